//! Storage backends for the serialized aggregate.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

/// Where the single serialized blob lives.
///
/// A backend stores exactly one value under one fixed key. `read` returning
/// `None` means the key has never been written, which callers treat as the
/// empty aggregate.
pub trait StorageBackend: Send + Sync {
    /// Read the blob, or `None` if it has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the medium exists but cannot be read.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the blob.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the medium cannot be written.
    fn write(&self, blob: &str) -> Result<(), StoreError>;
}

/// File-backed storage: the blob is one JSON file at a fixed path.
///
/// Writes go through a temporary file in the same directory followed by a
/// rename, so a crash mid-write leaves the previous blob intact.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at the given file path.
    ///
    /// The file does not need to exist yet; it is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path holding the blob.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        io::Write::write_all(&mut tmp, blob.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

/// In-memory storage, the test double for [`FileBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blob: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .blob
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn write(&self, blob: &str) -> Result<(), StoreError> {
        *self
            .blob
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(blob.to_owned());
        Ok(())
    }
}
