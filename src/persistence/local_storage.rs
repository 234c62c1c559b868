//! Browser LocalStorage record store

use super::{RecordStore, Records, StoreError};

/// Records persisted under a single LocalStorage key
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "kite_drift_records";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl RecordStore for LocalStorageStore {
    fn load(&self) -> Records {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(records) => return records,
                    Err(e) => log::warn!("Corrupt records in LocalStorage: {}", e),
                }
            }
        }

        log::info!("No records found, starting fresh");
        Records::default()
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable("no LocalStorage"))?;
        let json = serde_json::to_string(records)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable("LocalStorage write rejected"))?;
        log::info!("Records saved");
        Ok(())
    }
}
