//! The data access layer over one serialized aggregate.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::backend::{FileBackend, MemoryBackend, StorageBackend};
use crate::database::Database;
use crate::error::StoreError;

/// Default file name of the persisted blob.
pub const DEFAULT_DB_FILE: &str = "campus_food_db.json";

/// Single point of truth for the aggregate's durable state.
///
/// Every mutation follows the same shape: [`load`](Self::load) the whole
/// aggregate, edit the local copy, [`save`](Self::save) the whole aggregate
/// back. `Clone` is cheap; clones share the same backend.
#[derive(Clone)]
pub struct DataStore {
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore").finish_non_exhaustive()
    }
}

impl DataStore {
    /// Create a store over an arbitrary backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Create a file-backed store at the given path.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(path)))
    }

    /// Create an in-memory store (used by tests and tools).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Load the aggregate.
    ///
    /// Never fails: an absent blob is the empty initial state, and a blob
    /// that cannot be read or parsed degrades to the empty state with a
    /// logged warning.
    #[must_use]
    pub fn load(&self) -> Database {
        let blob = match self.backend.read() {
            Ok(Some(blob)) => blob,
            Ok(None) => return Database::default(),
            Err(e) => {
                warn!(error = %e, "failed to read the persisted aggregate, starting empty");
                return Database::default();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, "persisted aggregate is unreadable, starting empty");
                Database::default()
            }
        }
    }

    /// Persist the entire aggregate, overwriting whatever was stored.
    ///
    /// There is no partial write and no compare-and-swap: two interleaved
    /// load-mutate-save sequences race, and the last save wins, silently
    /// discarding the earlier writer's changes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the backend write fails.
    pub fn save(&self, db: &Database) -> Result<(), StoreError> {
        let blob = serde_json::to_string(db)?;
        self.backend.write(&blob)
    }
}
