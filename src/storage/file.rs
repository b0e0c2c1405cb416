use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::cache::{CachedFeed, FeedStore, LocalFeedItem, StoreError};

/// On-disk record: the whole cache as one JSON blob.
#[derive(Serialize, Deserialize)]
struct CacheRecord {
    feed: Vec<LocalFeedItem>,
    timestamp: DateTime<Utc>,
}

/// File-backed cache store: one JSON document at a fixed path.
///
/// Writes go to a randomized temp file in the same directory and are renamed
/// over the destination, so a partially written cache is never observable.
/// Operations are serialized by an internal lock; one instance should own a
/// given path at a time.
pub struct FileFeedStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileFeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        // Randomized suffix keeps the temp path unpredictable, so concurrent
        // writers from a misconfigured second instance cannot collide on it.
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        self.path.with_extension(format!("tmp.{suffix:016x}"))
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        let _guard = self.lock.lock().await;

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let record: CacheRecord = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Codec(e.to_string()))?;

        Ok(Some(CachedFeed {
            feed: record.feed,
            timestamp: record.timestamp,
        }))
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedItem>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let record = CacheRecord { feed, timestamp };
        let bytes =
            serde_json::to_vec(&record).map_err(|e| StoreError::Codec(e.to_string()))?;

        let temp = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp, &bytes).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::Io(e));
        }
        tokio::fs::rename(&temp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), items = record.feed.len(), "cache written");
        Ok(())
    }

    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
