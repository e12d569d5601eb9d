use std::sync::Arc;

use url::Url;

use crate::app::{DarkroomError, Result};
use crate::fetcher::HttpClient;
use crate::mapper::MapperError;

/// Pairs a transport with a mapper and collapses their failures into the two
/// errors callers can act on: [`DarkroomError::Connectivity`] when the
/// request itself fails and [`DarkroomError::InvalidData`] when the response
/// does not map.
pub struct RemoteLoader<R, M>
where
    M: Fn(&[u8], u16) -> std::result::Result<R, MapperError>,
{
    client: Arc<dyn HttpClient>,
    mapper: M,
}

impl<R, M> RemoteLoader<R, M>
where
    M: Fn(&[u8], u16) -> std::result::Result<R, MapperError>,
{
    pub fn new(client: Arc<dyn HttpClient>, mapper: M) -> Self {
        Self { client, mapper }
    }

    pub async fn load(&self, url: &Url) -> Result<R> {
        let response = self.client.get(url).await.map_err(|err| {
            tracing::debug!("request to {url} failed: {err}");
            DarkroomError::Connectivity
        })?;

        (self.mapper)(&response.body, response.status).map_err(|err| {
            tracing::debug!("mapping response from {url} failed: {err}");
            DarkroomError::InvalidData
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::fake::FakeClient;

    fn any_url() -> Url {
        Url::parse("https://api.example.com/v1/feed").unwrap()
    }

    fn utf8_mapper(body: &[u8], status: u16) -> std::result::Result<String, MapperError> {
        if status != 200 {
            return Err(MapperError::UnexpectedStatus(status));
        }
        String::from_utf8(body.to_vec()).map_err(|_| MapperError::EmptyImage)
    }

    #[tokio::test]
    async fn test_load_requests_the_given_url() {
        let client = Arc::new(FakeClient::offline().reply_with(200, b"ok"));
        let loader = RemoteLoader::new(client.clone(), utf8_mapper);

        loader.load(&any_url()).await.unwrap();

        assert_eq!(client.requests(), vec![any_url()]);
    }

    #[tokio::test]
    async fn test_load_delivers_mapped_value() {
        let client = Arc::new(FakeClient::offline().reply_with(200, b"hello"));
        let loader = RemoteLoader::new(client, utf8_mapper);

        let value = loader.load(&any_url()).await.unwrap();

        assert_eq!(value, "hello");
    }

    #[tokio::test]
    async fn test_load_collapses_transport_failure_to_connectivity() {
        let client = Arc::new(FakeClient::offline().reply_with_error());
        let loader = RemoteLoader::new(client, utf8_mapper);

        let result = loader.load(&any_url()).await;

        assert!(matches!(result, Err(DarkroomError::Connectivity)));
    }

    #[tokio::test]
    async fn test_load_collapses_mapper_failure_to_invalid_data() {
        let client = Arc::new(FakeClient::offline().reply_with(500, b"oops"));
        let loader = RemoteLoader::new(client, utf8_mapper);

        let result = loader.load(&any_url()).await;

        assert!(matches!(result, Err(DarkroomError::InvalidData)));
    }
}
