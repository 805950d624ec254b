//! Datastore error types.

use thiserror::Error;

/// Errors that can occur when persisting the aggregate.
///
/// Reads never produce these: an absent blob is the empty aggregate and an
/// unreadable one degrades to empty with a logged warning.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The aggregate could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
