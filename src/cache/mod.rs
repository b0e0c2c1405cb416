//! Local caching: the store contract, the 7-day validity policy, and the
//! loader that composes them.

mod local;
mod policy;
mod store;

pub use local::LocalFeedLoader;
pub use store::{CachedFeed, FeedStore, LocalFeedItem, StoreError};
