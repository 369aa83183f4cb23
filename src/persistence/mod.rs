//! Best-score persistence
//!
//! The simulation only ever reads the best score on a new game and writes it
//! when beaten. Backends:
//! - `MemoryStore`: in-process, records every write
//! - `JsonFileStore`: JSON file with tmp-then-rename writes (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm)

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Best score used when nothing has been stored yet
pub const DEFAULT_BEST_SCORE: u64 = 0;

/// Failures from a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored best score is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn read_best(&mut self) -> Result<Option<u64>, StoreError>;
    fn write_best(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Read the best score, falling back to the default on absence or failure
pub fn load_best<S: ScoreStore + ?Sized>(store: &mut S) -> u64 {
    match store.read_best() {
        Ok(Some(best)) => best,
        Ok(None) => {
            log::info!("No best score stored, starting fresh");
            DEFAULT_BEST_SCORE
        }
        Err(e) => {
            log::warn!("Failed to read best score: {e}");
            DEFAULT_BEST_SCORE
        }
    }
}

/// In-memory store that remembers every write
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u64>,
    writes: Vec<u64>,
}

impl MemoryStore {
    pub fn with_best(best: u64) -> Self {
        Self {
            best: Some(best),
            writes: Vec::new(),
        }
    }

    /// Every value written, oldest first
    pub fn writes(&self) -> &[u64] {
        &self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn read_best(&mut self) -> Result<Option<u64>, StoreError> {
        Ok(self.best)
    }

    fn write_best(&mut self, score: u64) -> Result<(), StoreError> {
        self.best = Some(score);
        self.writes.push(score);
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn read_best(&mut self) -> Result<Option<u64>, StoreError> {
        (**self).read_best()
    }

    fn write_best(&mut self, score: u64) -> Result<(), StoreError> {
        (**self).write_best(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn read_best(&mut self) -> Result<Option<u64>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn write_best(&mut self, _score: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_load_best_defaults() {
        assert_eq!(load_best(&mut MemoryStore::default()), DEFAULT_BEST_SCORE);
        assert_eq!(load_best(&mut MemoryStore::with_best(42)), 42);
        assert_eq!(load_best(&mut BrokenStore), DEFAULT_BEST_SCORE);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::default());
        store.write_best(12).unwrap();
        assert_eq!(store.read_best().unwrap(), Some(12));
    }

    #[test]
    fn test_failing_store_does_not_stop_scoring() {
        use crate::sim::Simulation;
        use crate::tuning::Tuning;

        let mut sim = Simulation::new(Tuning::default(), 3, BrokenStore);
        sim.award_points(50);
        assert_eq!(sim.state.score, 50);
        assert_eq!(sim.state.best_score, 50);
    }
}
