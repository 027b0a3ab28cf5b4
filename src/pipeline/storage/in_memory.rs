use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::Storage;
use crate::constants::SHOW_NAME_PARTITION;
use crate::domain::TelevisionRating;
use crate::error::Result;

/// In-memory storage implementation for development/testing. Ratings are
/// keyed by (air date, timeslot) like the real table; the show index
/// records every put it receives so tests can count writes.
pub struct InMemoryStorage {
    ratings: Arc<Mutex<HashMap<(NaiveDate, String), TelevisionRating>>>,
    show_index_puts: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            ratings: Arc::new(Mutex::new(HashMap::new())),
            show_index_puts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every (partition, show name) put issued so far, in order.
    pub fn show_index_puts(&self) -> Vec<(String, String)> {
        self.show_index_puts.lock().unwrap().clone()
    }

    pub fn ratings_count(&self) -> usize {
        self.ratings.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn ratings_on(&self, air_date: NaiveDate) -> Result<Vec<TelevisionRating>> {
        let ratings = self.ratings.lock().unwrap();
        let existing: Vec<TelevisionRating> = ratings
            .values()
            .filter(|r| r.ratings_occurred_on == air_date)
            .cloned()
            .collect();
        Ok(existing)
    }

    async fn insert_ratings(&self, batch: &[TelevisionRating]) -> Result<()> {
        let mut ratings = self.ratings.lock().unwrap();
        for rating in batch {
            let key = (rating.ratings_occurred_on, rating.time.clone());
            debug!("InMemoryStorage: inserting {:?} show={}", key, rating.show);
            ratings.insert(key, rating.clone());
        }
        Ok(())
    }

    async fn put_show_name(&self, show_name: &str) -> Result<()> {
        let mut puts = self.show_index_puts.lock().unwrap();
        puts.push((SHOW_NAME_PARTITION.to_string(), show_name.to_string()));
        Ok(())
    }
}
