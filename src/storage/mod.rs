//! Production [`FeedStore`](crate::cache::FeedStore) backends.

mod file;
mod sqlite;

pub use file::FileFeedStore;
pub use sqlite::SqliteFeedStore;
