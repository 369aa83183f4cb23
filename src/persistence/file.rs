//! JSON file backend for native builds

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScoreStore, StoreError};

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: u64,
}

/// Stores the best score as `{"best_score": N}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn read_best(&mut self) -> Result<Option<u64>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let file: BestScoreFile = serde_json::from_str(&json)?;
        log::info!("Loaded best score {} from {}", file.best_score, self.path.display());
        Ok(Some(file.best_score))
    }

    /// Write to a sibling tmp file, then rename over the real one
    fn write_best(&mut self, score: u64) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        let json = serde_json::to_string(&BestScoreFile { best_score: score })?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Best score {score} saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("best.json"));
        assert_eq!(store.read_best().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/best.json"));
        store.write_best(250).unwrap();
        assert_eq!(store.read_best().unwrap(), Some(250));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "{ nope").unwrap();
        let mut store = JsonFileStore::new(path);
        assert!(matches!(store.read_best(), Err(StoreError::Malformed(_))));
    }
}
