use thiserror::Error;
use url::Url;

use super::fetcher::HttpClient;
use super::item::FeedItem;
use super::mapper;

/// Failures surfaced by [`RemoteFeedLoader::load`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The transport failed to complete the request (network-level).
    #[error("could not reach the feed endpoint")]
    Connectivity,
    /// A response arrived but was not a decodable 200 feed payload.
    #[error("the feed endpoint returned invalid data")]
    InvalidData,
}

/// Loads the feed from a remote HTTP endpoint.
///
/// Stateless across invocations: every `load` call is independent and calls
/// may overlap on the same instance. Never retries; one transport failure is
/// one reported [`LoadError::Connectivity`]. Dropping an in-flight `load`
/// future cancels it, so a caller that goes away never observes a result.
pub struct RemoteFeedLoader<C: HttpClient> {
    url: Url,
    client: C,
}

impl<C: HttpClient> RemoteFeedLoader<C> {
    pub fn new(url: Url, client: C) -> Self {
        Self { url, client }
    }

    pub async fn load(&self) -> Result<Vec<FeedItem>, LoadError> {
        let response = match self.client.get(&self.url).await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(url = %self.url, error = %error, "feed request failed");
                return Err(LoadError::Connectivity);
            }
        };

        let items = mapper::map(&response.body, response.status)?;
        tracing::debug!(url = %self.url, count = items.len(), "feed loaded");

        Ok(items.into_iter().map(FeedItem::from).collect())
    }
}
