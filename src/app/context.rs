use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

use crate::app::dispatch::SerialDispatcher;
use crate::app::error::{DarkroomError, Result};
use crate::cache::{LocalFeedLoader, LocalImageDataLoader};
use crate::config::Config;
use crate::domain::{FeedImage, ImageComment, Paginated};
use crate::fetcher::endpoint;
use crate::fetcher::remote::RemoteLoader;
use crate::fetcher::reqwest_client::ReqwestClient;
use crate::fetcher::HttpClient;
use crate::mapper;
use crate::pipeline::{FeedPipeline, ImagePipeline, LoadTask};
use crate::store::sqlite::SqliteStore;

/// Wires the whole app together: one store, one transport, the pipelines
/// over them, and the presentation queue.
pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub client: Arc<dyn HttpClient>,
    pub feed: FeedPipeline,
    pub images: ImagePipeline,
    pub local_feed: Arc<LocalFeedLoader>,
    pub dispatcher: SerialDispatcher,
    base_url: Url,
    dispatcher_task: JoinHandle<()>,
}

impl AppContext {
    pub fn new(config: &Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path.or_else(|| config.cache.db_path.clone()) {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_client(config, store, Arc::new(ReqwestClient::new(&config.api)))
    }

    pub fn in_memory(config: &Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_client(config, store, Arc::new(ReqwestClient::new(&config.api)))
    }

    pub fn with_client(
        config: &Config,
        store: Arc<SqliteStore>,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self> {
        let base_url = config.api.base_url.clone();
        let local_feed = Arc::new(LocalFeedLoader::new(store.clone()));
        let local_images = Arc::new(LocalImageDataLoader::new(store.clone()));
        let feed = FeedPipeline::new(client.clone(), local_feed.clone(), base_url.clone());
        let images = ImagePipeline::new(client.clone(), local_images);
        let (dispatcher, dispatcher_task) = SerialDispatcher::spawn();

        Ok(Self {
            store,
            client,
            feed,
            images,
            local_feed,
            dispatcher,
            base_url,
            dispatcher_task,
        })
    }

    /// Start loading the first feed page in the background.
    pub fn load_feed(&self) -> LoadTask<Paginated<FeedImage>> {
        let feed = self.feed.clone();
        LoadTask::spawn(async move { feed.load().await })
    }

    /// Start loading one image's bytes in the background.
    pub fn load_image(&self, url: Url) -> LoadTask<Vec<u8>> {
        let images = self.images.clone();
        LoadTask::spawn(async move { images.load(&url).await })
    }

    /// Comments are always fetched live and never cached.
    pub fn load_comments(&self, image_id: Uuid) -> LoadTask<Vec<ImageComment>> {
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        LoadTask::spawn(async move {
            let url = endpoint::image_comments(&base_url, image_id)?;
            RemoteLoader::new(client, mapper::comments).load(&url).await
        })
    }

    pub async fn validate_cache(&self) -> Result<()> {
        self.local_feed.validate_cache().await
    }

    /// Flush the presentation queue and stop its worker.
    pub async fn shutdown(self) {
        self.dispatcher.shutdown();
        let _ = self.dispatcher_task.await;
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| DarkroomError::Config("Could not find data directory".into()))?;
        let darkroom_dir = data_dir.join("darkroom");
        std::fs::create_dir_all(&darkroom_dir)?;
        Ok(darkroom_dir.join("darkroom.db"))
    }
}
