//! Browser LocalStorage backend

use super::{ScoreStore, StoreError};

/// Stores the best score under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "asteroid_drift_best_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("LocalStorage disabled".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn read_best(&mut self) -> Result<Option<u64>, StoreError> {
        let item = Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        match item {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write_best(&mut self, score: u64) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.key, &serde_json::to_string(&score)?)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        log::info!("Best score {score} saved");
        Ok(())
    }
}
