use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::cache::policy;
use crate::domain::FeedImage;
use crate::store::{FeedStore, LocalFeedImage};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Presents the local feed cache as a loader (read path), a cache sink
/// (write path), and a validation entry point.
///
/// Async methods borrow `&self`, so pending work cannot outlive the loader.
pub struct LocalFeedLoader {
    store: Arc<dyn FeedStore>,
    current_date: Clock,
}

impl LocalFeedLoader {
    pub fn new(store: Arc<dyn FeedStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    /// Injecting the clock keeps expiry decisions testable; production
    /// wiring uses [`LocalFeedLoader::new`].
    pub fn with_clock(store: Arc<dyn FeedStore>, current_date: Clock) -> Self {
        Self {
            store,
            current_date,
        }
    }

    /// Loads the cached feed. An absent or expired cache reads as an empty
    /// feed, not an error. The read path never mutates the store.
    pub async fn load(&self) -> Result<Vec<FeedImage>> {
        match self.store.retrieve().await? {
            Some(cached) if policy::is_valid(cached.timestamp, (self.current_date)()) => {
                Ok(cached.feed.iter().map(FeedImage::from).collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Replaces the whole cache with `feed`, stamped with the current date.
    ///
    /// Delete and insert are two separate store calls, and a failure (or
    /// crash) between them leaves an empty cache rather than the old value.
    /// Accepted window; do not wrap the pair in a transaction.
    pub async fn save(&self, feed: &[FeedImage]) -> Result<()> {
        self.store.delete_cached_feed().await?;

        let local: Vec<LocalFeedImage> = feed.iter().map(LocalFeedImage::from).collect();
        self.store.insert(&local, (self.current_date)()).await
    }

    /// Deletes the cache if it is expired or unreadable; a valid or absent
    /// cache is left untouched.
    pub async fn validate_cache(&self) -> Result<()> {
        match self.store.retrieve().await {
            Err(err) => {
                tracing::warn!("feed cache unreadable, deleting: {err}");
                self.store.delete_cached_feed().await
            }
            Ok(Some(cached)) if !policy::is_valid(cached.timestamp, (self.current_date)()) => {
                tracing::debug!("feed cache expired, deleting");
                self.store.delete_cached_feed().await
            }
            Ok(_) => Ok(()),
        }
    }
}
