pub mod reddit;

pub use reddit::RedditPostSource;

use async_trait::async_trait;

use crate::error::Result;

/// One candidate post from the search feed: title, rendered body HTML,
/// and the feed's opaque cursor id for paging.
#[derive(Debug, Clone)]
pub struct RatingsPost {
    pub title: String,
    pub body_html: String,
    pub fullname: String,
}

/// Boundary to wherever the ratings posts live. The pipeline only needs
/// paged retrieval; auth and transport stay behind the implementation.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetches up to `limit` posts, optionally resuming after a cursor.
    /// An empty page means the feed is exhausted.
    async fn fetch_posts(&self, limit: u32, after: Option<&str>) -> Result<Vec<RatingsPost>>;
}
