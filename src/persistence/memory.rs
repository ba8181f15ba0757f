//! In-memory record store

use super::{Record, RecordStore, top_of};
use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordStore for MemoryStore {
    fn top_records(&self, limit: usize) -> Result<Vec<Record>, StoreError> {
        Ok(top_of(&self.records, limit))
    }

    fn find_by_nickname(&self, nickname: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.records.iter().find(|r| r.nickname == nickname).cloned())
    }

    fn add_record(&mut self, record: Record) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }

    fn update_record(&mut self, nickname: &str, score: u64) -> Result<(), StoreError> {
        if let Some(record) = self.records.iter_mut().find(|r| r.nickname == nickname) {
            record.record = score;
        }
        Ok(())
    }
}
