use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::feed::FeedItem;

/// Persistence-format variant of [`FeedItem`].
///
/// Structurally identical to the domain type but kept distinct so the stored
/// format and the domain model can evolve independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<&FeedItem> for LocalFeedItem {
    fn from(item: &FeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description.clone(),
            location: item.location.clone(),
            url: item.url.clone(),
        }
    }
}

impl From<LocalFeedItem> for FeedItem {
    fn from(local: LocalFeedItem) -> Self {
        FeedItem::new(local.id, local.description, local.location, local.url)
    }
}

/// The single cache slot: the last saved feed plus its save timestamp.
/// Replaced wholesale on every insert, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedItem>,
    pub timestamp: DateTime<Utc>,
}

/// Failures raised by a [`FeedStore`] backend. Loaders treat these as
/// opaque and propagate them verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache record could not be decoded: {0}")]
    Codec(String),
    #[error("cache database failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage abstraction over the single cache slot.
///
/// All three operations on one instance execute serially; implementations
/// must never interleave a retrieve with an insert or delete (lost updates
/// and torn reads otherwise). Futures resolve exactly once, on any task.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// `Ok(None)` means no cache exists; corrupt or unreadable data is an
    /// error, never `None`.
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError>;

    /// Replaces the entire stored cache. Atomic from the caller's point of
    /// view: either the old value or the new one is observable, never a mix.
    async fn insert(
        &self,
        feed: Vec<LocalFeedItem>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Removes any stored cache. Deleting an already-empty cache succeeds.
    async fn delete_cached_feed(&self) -> Result<(), StoreError>;
}
