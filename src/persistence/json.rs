//! JSON file record store
//!
//! The whole store is one JSON array of `{nickname, record}` objects. Every
//! write rewrites the file: serialize to `<file>.tmp`, then rename it over
//! the store file.

use std::path::PathBuf;

use super::{Record, RecordStore, top_of};
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl JsonFileStore {
    /// Open a store file. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(json) if json.trim().is_empty() => Vec::new(),
            Ok(json) => serde_json::from_str(&json).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No record store at {}, starting fresh", path.display());
                Vec::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        log::info!("Opened record store {} ({} records)", path.display(), records.len());
        Ok(Self { path, records })
    }

    fn save(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let json = serde_json::to_string_pretty(&self.records).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        log::debug!("Saved {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn top_records(&self, limit: usize) -> Result<Vec<Record>, StoreError> {
        Ok(top_of(&self.records, limit))
    }

    fn find_by_nickname(&self, nickname: &str) -> Result<Option<Record>, StoreError> {
        Ok(self.records.iter().find(|r| r.nickname == nickname).cloned())
    }

    fn add_record(&mut self, record: Record) -> Result<(), StoreError> {
        self.records.push(record);
        self.save()
    }

    fn update_record(&mut self, nickname: &str, score: u64) -> Result<(), StoreError> {
        match self.records.iter_mut().find(|r| r.nickname == nickname) {
            Some(record) => {
                record.record = score;
                self.save()
            }
            None => {
                log::warn!("No record for {} to update", nickname);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(label: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "car-racing-store-{}-{}",
                label,
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir.join("records.json"))
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            if let Some(dir) = self.0.parent() {
                let _ = std::fs::remove_dir_all(dir);
            }
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let file = TempFile::new("missing");
        let store = JsonFileStore::open(&file.0).unwrap();
        assert!(store.top_records(3).unwrap().is_empty());
        assert!(!file.0.exists());
    }

    #[test]
    fn test_scores_survive_reopen() {
        let file = TempFile::new("reopen");
        {
            let mut store = JsonFileStore::open(&file.0).unwrap();
            store.submit_score("ann", 5).unwrap();
            store.submit_score("bob", 9).unwrap();
            store.submit_score("ann", 2).unwrap();
        }
        let store = JsonFileStore::open(&file.0).unwrap();
        assert_eq!(
            store.top_records(3).unwrap(),
            vec![
                Record {
                    nickname: "bob".into(),
                    record: 9
                },
                Record {
                    nickname: "ann".into(),
                    record: 5
                },
            ]
        );
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let file = TempFile::new("tmp");
        let mut store = JsonFileStore::open(&file.0).unwrap();
        store.submit_score("ann", 1).unwrap();
        let mut tmp = file.0.clone().into_os_string();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());
        assert!(file.0.exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let file = TempFile::new("corrupt");
        std::fs::write(&file.0, "{ not json").unwrap();
        let err = JsonFileStore::open(&file.0).unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn test_reads_plain_array_format() {
        let file = TempFile::new("format");
        std::fs::write(
            &file.0,
            r#"[{"nickname":"zed","record":3},{"nickname":"amy","record":11}]"#,
        )
        .unwrap();
        let store = JsonFileStore::open(&file.0).unwrap();
        assert_eq!(store.top_records(1).unwrap()[0].nickname, "amy");
        assert_eq!(store.find_by_nickname("zed").unwrap().unwrap().record, 3);
    }
}
