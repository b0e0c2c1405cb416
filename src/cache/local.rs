use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::policy;
use super::store::{FeedStore, LocalFeedItem, StoreError};
use crate::feed::FeedItem;

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Read-through cached feed access on top of a [`FeedStore`].
///
/// `load` degrades an expired or missing cache to an empty success so the
/// read path never fails for staleness alone. `save` replaces the whole slot
/// via delete-then-insert. `validate_cache` is the only operation that
/// deletes stale or corrupt entries.
///
/// Dropping an in-flight `save`/`load`/`validate_cache` future cancels it at
/// the next await point: no result is delivered and no further store action
/// is taken on the loader's behalf (store work already submitted may still
/// physically complete).
pub struct LocalFeedLoader {
    store: Arc<dyn FeedStore>,
    current_date: Clock,
}

impl LocalFeedLoader {
    pub fn new(store: Arc<dyn FeedStore>) -> Self {
        Self::with_clock(store, Utc::now)
    }

    /// Inject the clock used for save timestamps and expiry checks.
    pub fn with_clock<F>(store: Arc<dyn FeedStore>, current_date: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            store,
            current_date: Box::new(current_date),
        }
    }

    /// Replace the cached feed with `feed`, stamped with the current time.
    ///
    /// Deletes the old cache first; if deletion fails the insert is never
    /// attempted (writing into an indeterminate cache state is refused) and
    /// the deletion error is returned verbatim.
    pub async fn save(&self, feed: &[FeedItem]) -> Result<(), StoreError> {
        self.store.delete_cached_feed().await?;

        let local: Vec<LocalFeedItem> = feed.iter().map(LocalFeedItem::from).collect();
        self.store.insert(local, (self.current_date)()).await
    }

    /// Load the cached feed.
    ///
    /// An empty or expired cache yields `Ok(vec![])`; only store failures
    /// surface as errors. Never deletes anything, even when expired —
    /// cache hygiene belongs to [`validate_cache`](Self::validate_cache).
    pub async fn load(&self) -> Result<Vec<FeedItem>, StoreError> {
        match self.store.retrieve().await? {
            Some(cached) if policy::validate(cached.timestamp, (self.current_date)()) => {
                tracing::debug!(count = cached.feed.len(), "serving cached feed");
                Ok(cached.feed.into_iter().map(FeedItem::from).collect())
            }
            Some(_) => {
                tracing::debug!("cached feed expired; serving empty feed");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// Best-effort cache hygiene: delete the cache when it is unreadable or
    /// expired, keep it when it is empty or still valid. Errors are logged
    /// and swallowed; there is nothing actionable for the caller.
    pub async fn validate_cache(&self) {
        let stale = match self.store.retrieve().await {
            Err(error) => {
                tracing::warn!(error = %error, "cache unreadable; deleting");
                true
            }
            Ok(Some(cached)) => !policy::validate(cached.timestamp, (self.current_date)()),
            Ok(None) => false,
        };

        if stale {
            if let Err(error) = self.store.delete_cached_feed().await {
                tracing::warn!(error = %error, "failed to delete stale cache");
            }
        }
    }
}
