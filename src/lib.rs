//! Client-side feed loading with a transparent, time-limited local cache.
//!
//! [`RemoteFeedLoader`] fetches and decodes the feed from an HTTP endpoint;
//! [`LocalFeedLoader`] caches it through a [`FeedStore`] backend with a
//! seven-day validity window. Both expose the same `load -> Result<Vec<FeedItem>, _>`
//! shape so callers can substitute or compose them.
//!
//! All operations are `async` and resolve exactly once. Results may be
//! produced on any task; callers needing a particular thread re-dispatch
//! themselves. Dropping an in-flight future cancels it without delivering
//! a result.

pub mod cache;
pub mod feed;
pub mod storage;

pub use cache::{CachedFeed, FeedStore, LocalFeedItem, LocalFeedLoader, StoreError};
pub use feed::{FeedItem, HttpClient, LoadError, RemoteFeedLoader, ReqwestHttpClient};
pub use storage::{FileFeedStore, SqliteFeedStore};
