pub mod context;
pub mod dispatch;
pub mod error;

pub use context::AppContext;
pub use dispatch::SerialDispatcher;
pub use error::{DarkroomError, Result};
