//! Authentication error types.

use thiserror::Error;

use campus_canteen_core::UsernameError;
use campus_canteen_datastore::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Invalid credentials (wrong username or wrong password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// Password missing.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// Datastore error.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}
