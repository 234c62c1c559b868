//! JSON file record store for native builds

use std::fs;
use std::path::{Path, PathBuf};

use super::{RecordStore, Records, StoreError};

/// File name used under the default data directory
const FILE_NAME: &str = "records.json";

/// Records kept as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/kite-drift/records.json`, or the working directory if the
    /// platform has no data directory
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .map(|d| d.join("kite-drift"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Records {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No records at {}, starting fresh", self.path.display());
                return Records::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Corrupt records in {}: {}", self.path.display(), e);
                Records::default()
            }
        }
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        log::info!("Records saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert_eq!(store.load(), Records::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join(FILE_NAME));
        let records = Records {
            high_score: 42.5,
            total_charms: 9,
        };
        store.save(&records).unwrap();

        let reopened = JsonFileStore::new(store.path());
        assert_eq!(reopened.load(), records);
    }

    #[test]
    fn test_corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), Records::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, r#"{ "high_score": 7.0 }"#).unwrap();
        let records = JsonFileStore::new(&path).load();
        assert_eq!(records.high_score, 7.0);
        assert_eq!(records.total_charms, 0);
    }
}
