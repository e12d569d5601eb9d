pub mod endpoint;
pub mod remote;
pub mod reqwest_client;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

/// A response as the server sent it. The transport reports every status
/// code; deciding what a status means belongs to the mappers.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}
