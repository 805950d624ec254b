//! User account record.

use serde::{Deserialize, Serialize};

use campus_canteen_core::{UserId, Username};

/// A registered account, student or merchant.
///
/// The `password_hash` field stores the password verbatim; there is no
/// hashing layer anywhere in the system (authentication security is outside
/// this platform's scope). Users are created at registration and never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub is_merchant: bool,
}

impl User {
    /// Create a new account record with a fresh id.
    #[must_use]
    pub fn new(username: Username, password: &str, is_merchant: bool) -> Self {
        Self {
            id: UserId::generate(),
            username,
            password_hash: password.to_owned(),
            is_merchant,
        }
    }
}
