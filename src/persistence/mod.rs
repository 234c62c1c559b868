//! High score and charm totals persistence
//!
//! Backends:
//! - `MemoryStore`: process-local, used by tests and as a fallback
//! - `JsonFileStore`: JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Records that outlive a single run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    /// Best final score ever reached
    pub high_score: f64,
    /// Charms collected across every run
    pub total_charms: u32,
}

impl Records {
    /// Fold a finished run into the records
    ///
    /// Returns true if anything changed (and so needs saving).
    pub fn apply_run(&mut self, score: f64, charms: u32) -> bool {
        let mut changed = false;
        if score > self.high_score {
            self.high_score = score;
            changed = true;
        }
        if charms > 0 {
            self.total_charms = self.total_charms.saturating_add(charms);
            changed = true;
        }
        changed
    }
}

/// Errors that can occur when saving records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Browser storage missing or rejected the write
    #[error("record storage unavailable: {0}")]
    Unavailable(&'static str),
}

/// Storage backend for `Records`
pub trait RecordStore {
    /// Latest records; missing or unreadable data yields defaults
    fn load(&self) -> Records;

    /// Persist records immediately
    fn save(&mut self, records: &Records) -> Result<(), StoreError>;
}

/// In-memory record store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with records
    pub fn with_records(records: Records) -> Self {
        Self { records, saves: 0 }
    }

    /// Number of successful saves
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Records {
        self.records
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        self.records = *records;
        self.saves += 1;
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn load(&self) -> Records {
        (**self).load()
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        (**self).save(records)
    }
}
