pub mod in_memory;

pub use in_memory::InMemoryStorage;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::TelevisionRating;
use crate::error::Result;

/// Record store boundary for the ingestion pipeline. Transport, table
/// management, and backup rotation live behind implementations of this
/// trait; the pipeline only needs these three operations.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Every rating already persisted for an exact air date.
    async fn ratings_on(&self, air_date: NaiveDate) -> Result<Vec<TelevisionRating>>;

    /// Batch-inserts ratings; the caller guarantees the dates are new.
    async fn insert_ratings(&self, ratings: &[TelevisionRating]) -> Result<()>;

    /// Upserts one show name into the secondary index, keyed by the fixed
    /// partition value and the show name as sort key.
    async fn put_show_name(&self, show_name: &str) -> Result<()>;
}
