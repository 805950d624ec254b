//! Authentication service.
//!
//! Accounts are local to this installation. Passwords are stored and
//! compared verbatim - there is no hashing layer anywhere in the system
//! (authentication security is outside this platform's scope).

mod error;

pub use error::AuthError;

use tracing::info;

use campus_canteen_core::Username;
use campus_canteen_datastore::models::User;
use campus_canteen_datastore::DataStore;

/// Authentication service.
///
/// Handles registration and login for both students and merchants; the
/// account's `is_merchant` flag decides which window opens after login.
pub struct AuthService<'a> {
    store: &'a DataStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// Uniqueness is checked against the same freshly loaded aggregate the
    /// new record is written into. Registration does not broadcast a change
    /// signal; the new account only matters to the window that created it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username fails validation.
    /// Returns `AuthError::EmptyPassword` if the password is empty.
    /// Returns `AuthError::UsernameTaken` if the username is already registered.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        is_merchant: bool,
    ) -> Result<User, AuthError> {
        let username = Username::parse(username)?;

        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let mut db = self.store.load();
        if db.find_user(username.as_str()).is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let user = User::new(username, password, is_merchant);
        db.users.push(user.clone());
        self.store.save(&db)?;

        info!(username = %user.username, is_merchant, "account registered");
        Ok(user)
    }

    /// Login with username and password.
    ///
    /// A wrong username and a wrong password both fold into
    /// `InvalidCredentials`, so a caller cannot probe which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair does not match.
    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let db = self.store.load();

        let user = db
            .find_user(username.trim())
            .ok_or(AuthError::InvalidCredentials)?;

        if user.password_hash != password {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.clone())
    }
}
