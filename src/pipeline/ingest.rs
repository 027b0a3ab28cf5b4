use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::apis::PostSource;
use crate::domain::TelevisionRating;
use crate::error::Result;
use crate::pipeline::processing::assemble::assemble_post;
use crate::pipeline::processing::extract::is_ratings_post;
use crate::pipeline::storage::Storage;

/// How a dedup-guarded insertion run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertionOutcome {
    /// Every distinct date in the batch was new and got inserted.
    FullyInserted { inserted: Vec<NaiveDate> },
    /// The scan hit a date already persisted and stopped there; everything
    /// older in the batch was assumed present and left untouched.
    ShortCircuited {
        inserted: Vec<NaiveDate>,
        stopped_at: NaiveDate,
    },
}

/// Inserts only the nights the store does not have yet.
///
/// Distinct air dates are scanned most-recent-first, one query per date,
/// and the scan stops at the first date that already has records. This
/// relies on ingestion being append-only and gap-free: a newer night is
/// never persisted while an older one in the same batch is missing. That
/// assumption is inherited from the source feed, not verified here; the
/// returned outcome says where the scan stopped so a caller can audit.
pub async fn insert_new_ratings(
    storage: &dyn Storage,
    batch: &[TelevisionRating],
) -> Result<InsertionOutcome> {
    let distinct_dates: BTreeSet<NaiveDate> =
        batch.iter().map(|r| r.ratings_occurred_on).collect();

    let mut inserted = Vec::new();
    for air_date in distinct_dates.into_iter().rev() {
        let existing = storage.ratings_on(air_date).await?;
        if !existing.is_empty() {
            info!(
                "insert_new_ratings: {} already persisted, stopping scan",
                air_date
            );
            return Ok(InsertionOutcome::ShortCircuited {
                inserted,
                stopped_at: air_date,
            });
        }

        let night: Vec<TelevisionRating> = batch
            .iter()
            .filter(|r| r.ratings_occurred_on == air_date)
            .cloned()
            .collect();
        debug!(
            "insert_new_ratings: inserting {} records for {}",
            night.len(),
            air_date
        );
        storage.insert_ratings(&night).await?;
        inserted.push(air_date);
    }

    Ok(InsertionOutcome::FullyInserted { inserted })
}

/// Upserts each distinct show name of the batch into the secondary index,
/// one write per name no matter how many nights it aired.
pub async fn index_show_names(
    storage: &dyn Storage,
    batch: &[TelevisionRating],
) -> Result<usize> {
    let distinct_shows: BTreeSet<&str> = batch.iter().map(|r| r.show.as_str()).collect();

    for show_name in &distinct_shows {
        storage.put_show_name(show_name).await?;
    }

    info!("index_show_names: indexed {} shows", distinct_shows.len());
    Ok(distinct_shows.len())
}

/// Walks the search feed and assembles canonical records from every
/// ratings post found, paging by the feed's cursor in batches of 25.
pub async fn collect_ratings(
    source: &dyn PostSource,
    number_posts: u32,
) -> Result<Vec<TelevisionRating>> {
    const PAGE_SIZE: u32 = 25;

    let mut all_ratings = Vec::new();
    let mut after: Option<String> = None;
    let mut remaining = number_posts;

    while remaining > 0 {
        let posts = source
            .fetch_posts(remaining.min(PAGE_SIZE), after.as_deref())
            .await?;
        if posts.is_empty() {
            debug!("collect_ratings: no more posts to iterate");
            break;
        }
        remaining = remaining.saturating_sub(posts.len() as u32);

        let mut last_fullname = None;
        for post in posts {
            last_fullname = Some(post.fullname);
            if !is_ratings_post(&post.title) {
                continue;
            }
            info!("collect_ratings: ratings post found: {:?}", post.title);
            all_ratings.extend(assemble_post(&post.title, &post.body_html)?);
        }
        after = last_fullname;
    }

    Ok(all_ratings)
}

#[derive(Debug)]
pub struct IngestionSummary {
    pub records: usize,
    pub outcome: InsertionOutcome,
    pub shows_indexed: usize,
}

/// One full ingestion run: fetch, assemble, dedup-guarded insert, index.
pub async fn run_ingestion(
    source: &dyn PostSource,
    storage: &dyn Storage,
    number_posts: u32,
) -> Result<IngestionSummary> {
    let batch = collect_ratings(source, number_posts).await?;
    let outcome = insert_new_ratings(storage, &batch).await?;
    let shows_indexed = index_show_names(storage, &batch).await?;

    Ok(IngestionSummary {
        records: batch.len(),
        outcome,
        shows_indexed,
    })
}
