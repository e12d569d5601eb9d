use std::sync::Arc;

use url::Url;

use crate::app::Result;
use crate::cache::LocalImageDataLoader;
use crate::fetcher::remote::RemoteLoader;
use crate::fetcher::HttpClient;
use crate::mapper;
use crate::pipeline::{caching, fallback};

/// Loads image bytes cache-first: a hit never touches the network, a miss
/// fetches remotely and feeds the cache.
#[derive(Clone)]
pub struct ImagePipeline {
    client: Arc<dyn HttpClient>,
    local: Arc<LocalImageDataLoader>,
}

impl ImagePipeline {
    pub fn new(client: Arc<dyn HttpClient>, local: Arc<LocalImageDataLoader>) -> Self {
        Self { client, local }
    }

    pub async fn load(&self, url: &Url) -> Result<Vec<u8>> {
        let this = self.clone();
        let remote_url = url.clone();

        fallback(self.local.load(url), move || async move {
            let sink = this.local.clone();
            let save_url = remote_url.clone();
            caching(
                this.remote_image(&remote_url),
                move |data: Vec<u8>| async move { sink.save(&data, &save_url).await },
            )
            .await
        })
        .await
    }

    async fn remote_image(&self, url: &Url) -> Result<Vec<u8>> {
        RemoteLoader::new(self.client.clone(), mapper::image_data)
            .load(url)
            .await
    }
}
