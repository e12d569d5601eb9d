//! Local-cache loaders layered over the store traits: a validating feed
//! cache with a seven day lifetime and a byte cache for image data.

pub mod feed;
pub mod image;
pub(crate) mod policy;

pub use feed::{Clock, LocalFeedLoader};
pub use image::LocalImageDataLoader;
