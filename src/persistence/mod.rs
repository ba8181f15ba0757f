//! Leaderboard record storage
//!
//! One record per nickname holding that player's best score. Backends:
//! - `JsonFileStore`: a JSON array in a single file, written via temp + rename
//! - `MemoryStore`: in-process, for tests and dry runs

pub mod json;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// A player's best score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub nickname: String,
    pub record: u64,
}

/// Persistent nickname -> best score mapping
pub trait RecordStore {
    /// Records sorted by score, descending, at most `limit` of them
    fn top_records(&self, limit: usize) -> Result<Vec<Record>, StoreError>;

    fn find_by_nickname(&self, nickname: &str) -> Result<Option<Record>, StoreError>;

    fn add_record(&mut self, record: Record) -> Result<(), StoreError>;

    /// Overwrite the score of an existing nickname
    fn update_record(&mut self, nickname: &str, score: u64) -> Result<(), StoreError>;

    /// Upsert keeping the maximum of the stored and the new score
    ///
    /// Returns the record now stored.
    fn submit_score(&mut self, nickname: &str, score: u64) -> Result<Record, StoreError> {
        match self.find_by_nickname(nickname)? {
            Some(existing) if existing.record >= score => {
                log::info!(
                    "Keeping {}'s record {} (scored {})",
                    nickname,
                    existing.record,
                    score
                );
                Ok(existing)
            }
            Some(existing) => {
                self.update_record(nickname, score)?;
                log::info!(
                    "New record for {}: {} (was {})",
                    nickname,
                    score,
                    existing.record
                );
                Ok(Record {
                    nickname: nickname.to_string(),
                    record: score,
                })
            }
            None => {
                let record = Record {
                    nickname: nickname.to_string(),
                    record: score,
                };
                self.add_record(record.clone())?;
                log::info!("First record for {}: {}", nickname, score);
                Ok(record)
            }
        }
    }
}

/// Sort descending by score and cut to `limit`
pub(crate) fn top_of(records: &[Record], limit: usize) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.record.cmp(&a.record));
    sorted.truncate(limit);
    sorted
}
