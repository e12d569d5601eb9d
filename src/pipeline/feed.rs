use std::sync::Arc;

use futures::future;
use url::Url;
use uuid::Uuid;

use crate::app::Result;
use crate::cache::LocalFeedLoader;
use crate::domain::{FeedImage, LoadMoreFn, Paginated};
use crate::fetcher::endpoint;
use crate::fetcher::remote::RemoteLoader;
use crate::fetcher::HttpClient;
use crate::mapper;
use crate::pipeline::{caching, fallback};

/// Loads the photo feed remote-first with the local cache as fallback, and
/// pages through it cumulatively.
///
/// The handle is cheap to clone; pagination continuations hold a clone, so a
/// page stays loadable after the pipeline that produced it is gone.
#[derive(Clone)]
pub struct FeedPipeline {
    client: Arc<dyn HttpClient>,
    local: Arc<LocalFeedLoader>,
    base_url: Url,
}

impl FeedPipeline {
    pub fn new(client: Arc<dyn HttpClient>, local: Arc<LocalFeedLoader>, base_url: Url) -> Self {
        Self {
            client,
            local,
            base_url,
        }
    }

    /// First page: the remote feed, cached on success, with the local cache
    /// standing in when the network fails. An empty feed is terminal.
    pub async fn load(&self) -> Result<Paginated<FeedImage>> {
        let this = self.clone();
        let sink = self.local.clone();
        let remote = caching(
            async move { this.remote_page(None).await },
            move |feed: Vec<FeedImage>| async move { sink.save(&feed).await },
        );

        let local = self.local.clone();
        let items = fallback(remote, move || async move { local.load().await }).await?;

        Ok(self.first_page(items))
    }

    /// Next cumulative page: the cache snapshot plus the remote page after
    /// `after`, merged in that order and cached wholesale. Duplicates are
    /// kept; the server owns feed composition.
    async fn load_more(&self, after: Uuid) -> Result<Paginated<FeedImage>> {
        let this = self.clone();
        let op = async move {
            let (cached, new) =
                future::try_join(this.local.load(), this.remote_page(Some(after))).await?;

            let cursor = new.last().map(|image| image.id);
            let mut merged = cached;
            merged.extend(new);
            Ok((merged, cursor))
        };

        let sink = self.local.clone();
        let (merged, cursor) = caching(
            op,
            move |(feed, _): (Vec<FeedImage>, Option<Uuid>)| async move { sink.save(&feed).await },
        )
        .await?;

        Ok(self.page(merged, cursor))
    }

    async fn remote_page(&self, after: Option<Uuid>) -> Result<Vec<FeedImage>> {
        let url = endpoint::feed(&self.base_url, after)?;
        RemoteLoader::new(self.client.clone(), mapper::feed_page)
            .load(&url)
            .await
    }

    fn first_page(&self, items: Vec<FeedImage>) -> Paginated<FeedImage> {
        let cursor = items.last().map(|image| image.id);
        self.page(items, cursor)
    }

    fn page(&self, items: Vec<FeedImage>, cursor: Option<Uuid>) -> Paginated<FeedImage> {
        match cursor {
            Some(after) => {
                let this = self.clone();
                let load_next: LoadMoreFn<FeedImage> = Arc::new(move || {
                    let this = this.clone();
                    Box::pin(async move { this.load_more(after).await })
                });
                Paginated::new(items, Some(load_next))
            }
            None => Paginated::terminal(items),
        }
    }
}
