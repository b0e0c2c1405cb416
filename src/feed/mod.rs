//! Remote feed loading: transport seam, JSON mapping, and the loader that
//! ties them together.

mod fetcher;
mod item;
mod mapper;
mod remote;

pub use fetcher::{HttpClient, HttpError, HttpResponse, ReqwestHttpClient};
pub use item::FeedItem;
pub use remote::{LoadError, RemoteFeedLoader};
