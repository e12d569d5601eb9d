pub mod comment;
pub mod image;
pub mod page;

pub use comment::ImageComment;
pub use image::FeedImage;
pub use page::{LoadMoreFn, Paginated};
