use std::sync::Arc;

use url::Url;

use crate::app::{DarkroomError, Result};
use crate::store::ImageDataStore;

/// Loads and caches raw image bytes keyed by URL. Image data has no
/// expiration; entries live until evicted by an overwrite.
pub struct LocalImageDataLoader {
    store: Arc<dyn ImageDataStore>,
}

impl LocalImageDataLoader {
    pub fn new(store: Arc<dyn ImageDataStore>) -> Self {
        Self { store }
    }

    /// A cache miss is an error here, unlike the feed cache: callers fall
    /// back to the network on [`DarkroomError::ImageNotFound`].
    pub async fn load(&self, url: &Url) -> Result<Vec<u8>> {
        self.store
            .retrieve(url)
            .await?
            .ok_or_else(|| DarkroomError::ImageNotFound(url.clone()))
    }

    pub async fn save(&self, data: &[u8], url: &Url) -> Result<()> {
        self.store.insert(data, url).await
    }
}
