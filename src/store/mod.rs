pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::app::Result;
use crate::domain::FeedImage;

pub use sqlite::SqliteStore;

/// Persistence-layer twin of [`FeedImage`]. Keeping the storage schema on
/// its own type lets either side evolve without dragging the other along;
/// conversion is lossless in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<&FeedImage> for LocalFeedImage {
    fn from(image: &FeedImage) -> Self {
        Self {
            id: image.id,
            description: image.description.clone(),
            location: image.location.clone(),
            url: image.url.clone(),
        }
    }
}

impl From<&LocalFeedImage> for FeedImage {
    fn from(local: &LocalFeedImage) -> Self {
        Self {
            id: local.id,
            description: local.description.clone(),
            location: local.location.clone(),
            url: local.url.clone(),
        }
    }
}

/// The single whole-feed cache entry. Replaced wholesale on every insert;
/// there is never more than one.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedImage>,
    pub timestamp: DateTime<Utc>,
}

/// Feed cache persistence. Implementations must apply calls in strict
/// serial FIFO order matching call order; callers must not assume calls
/// complete synchronously. Concurrent pipelines racing a save against a
/// load may observe either the old or the new row.
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn retrieve(&self) -> Result<Option<CachedFeed>>;

    /// Replaces the whole cache entry. There is no partial update.
    async fn insert(&self, feed: &[LocalFeedImage], timestamp: DateTime<Utc>) -> Result<()>;

    async fn delete_cached_feed(&self) -> Result<()>;
}

/// Image byte persistence, keyed by source URL. Same serialization
/// contract as [`FeedStore`].
#[async_trait]
pub trait ImageDataStore: Send + Sync {
    async fn retrieve(&self, url: &Url) -> Result<Option<Vec<u8>>>;

    async fn insert(&self, data: &[u8], url: &Url) -> Result<()>;
}
