use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use url::Url;
use uuid::Uuid;

use crate::cache::{CachedFeed, FeedStore, LocalFeedItem, StoreError};

/// SQLite-backed cache store: a singleton cache row plus ordered item rows.
///
/// `insert` and `delete_cached_feed` each run inside one transaction, so the
/// slot is always either the previous cache or the new one, never a mix.
/// Operations are additionally serialized by an internal lock (the slot is
/// single-writer by contract).
pub struct SqliteFeedStore {
    pool: SqlitePool,
    lock: Mutex<()>,
}

impl SqliteFeedStore {
    /// Open (creating if needed) the database at `path` and ensure the
    /// schema exists. Use `":memory:"` for an ephemeral store.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let url = format!("sqlite:{path}?mode=rwc");

        // busy_timeout=5000: wait up to 5s for transient locks instead of
        // failing with SQLITE_BUSY immediately.
        let options = SqliteConnectOptions::from_str(&url)?.pragma("busy_timeout", "5000");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self {
            pool,
            lock: Mutex::new(()),
        };
        store.migrate().await?;
        Ok(store)
    }

    /// Schema setup, idempotent (`IF NOT EXISTS`) so reopening an existing
    /// database is a no-op.
    async fn migrate(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feed_cache (
                id INTEGER PRIMARY KEY CHECK (id = 0),
                timestamp TEXT NOT NULL
            )
        "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feed_cache_items (
                position INTEGER PRIMARY KEY,
                id TEXT NOT NULL,
                description TEXT,
                location TEXT,
                url TEXT NOT NULL
            )
        "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    fn decode_item(
        (id, description, location, url): (String, Option<String>, Option<String>, String),
    ) -> Result<LocalFeedItem, StoreError> {
        let id = Uuid::parse_str(&id).map_err(|e| StoreError::Codec(e.to_string()))?;
        let url = Url::parse(&url).map_err(|e| StoreError::Codec(e.to_string()))?;
        Ok(LocalFeedItem {
            id,
            description,
            location,
            url,
        })
    }
}

#[async_trait]
impl FeedStore for SqliteFeedStore {
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        let _guard = self.lock.lock().await;

        let row: Option<(String,)> =
            sqlx::query_as("SELECT timestamp FROM feed_cache WHERE id = 0")
                .fetch_optional(&self.pool)
                .await?;

        let Some((timestamp,)) = row else {
            return Ok(None);
        };

        let timestamp = DateTime::parse_from_rfc3339(&timestamp)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| StoreError::Codec(e.to_string()))?;

        let rows: Vec<(String, Option<String>, Option<String>, String)> = sqlx::query_as(
            r#"
            SELECT id, description, location, url
            FROM feed_cache_items
            ORDER BY position
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let feed = rows
            .into_iter()
            .map(Self::decode_item)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CachedFeed { feed, timestamp }))
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedItem>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM feed_cache").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM feed_cache_items")
            .execute(&mut *tx)
            .await?;

        // RFC3339 with nanoseconds round-trips the timestamp exactly.
        sqlx::query("INSERT INTO feed_cache (id, timestamp) VALUES (0, ?)")
            .bind(timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true))
            .execute(&mut *tx)
            .await?;

        for (position, item) in feed.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO feed_cache_items (position, id, description, location, url)
                VALUES (?, ?, ?, ?, ?)
            "#,
            )
            .bind(position as i64)
            .bind(item.id.to_string())
            .bind(&item.description)
            .bind(&item.location)
            .bind(item.url.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(items = feed.len(), "cache replaced");
        Ok(())
    }

    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM feed_cache").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM feed_cache_items")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }
}
