//! Store profile lifecycle.

use thiserror::Error;
use tracing::info;

use campus_canteen_core::{CampusLocation, UserId};
use campus_canteen_datastore::models::Store;
use campus_canteen_datastore::{ChangeNotifier, DataStore, StoreError};

/// Errors that can occur when managing a store profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The acting account does not exist.
    #[error("account not found")]
    UnknownUser,

    /// The acting account is not a merchant.
    #[error("account has no merchant permissions")]
    NotMerchant,

    /// The owner already has a listed store.
    #[error("account already owns a store")]
    StoreAlreadyExists,

    /// The owner has no listed store.
    #[error("account owns no store")]
    NoStore,

    /// The store name is empty.
    #[error("store name cannot be empty")]
    EmptyName,

    /// Datastore error.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}

/// Store profile management for the merchant window.
pub struct StoreProfileService<'a> {
    store: &'a DataStore,
    notifier: &'a ChangeNotifier,
}

impl<'a> StoreProfileService<'a> {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(store: &'a DataStore, notifier: &'a ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    /// Open a new store for a merchant account.
    ///
    /// One listed store per owner: the check runs against the same freshly
    /// loaded aggregate the store is written into. A previously deleted
    /// store does not block opening a new one.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnknownUser`/`NotMerchant` for bad actors,
    /// `StoreAlreadyExists` when the owner already has a listed store, and
    /// `EmptyName` for a blank name.
    pub fn create_store(
        &self,
        owner_id: UserId,
        name: &str,
        location: CampusLocation,
        description: &str,
    ) -> Result<Store, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }

        let mut db = self.store.load();

        let owner = db.user_by_id(owner_id).ok_or(ProfileError::UnknownUser)?;
        if !owner.is_merchant {
            return Err(ProfileError::NotMerchant);
        }
        if db.store_for_owner(owner_id).is_some() {
            return Err(ProfileError::StoreAlreadyExists);
        }

        let store = Store::new(owner_id, name.to_owned(), location, description.to_owned());
        db.stores.push(store.clone());
        self.store.save(&db)?;
        self.notifier.notify();

        info!(store_id = %store.id, name = %store.name, "store opened");
        Ok(store)
    }

    /// The owner's listed store, if any.
    #[must_use]
    pub fn my_store(&self, owner_id: UserId) -> Option<Store> {
        self.store.load().store_for_owner(owner_id).cloned()
    }

    /// Update name, location, and description of the owner's store.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoStore` if the owner has no listed store and
    /// `EmptyName` for a blank name.
    pub fn update_profile(
        &self,
        owner_id: UserId,
        name: &str,
        location: CampusLocation,
        description: &str,
    ) -> Result<Store, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }

        let mut db = self.store.load();
        let store_id = db
            .store_for_owner(owner_id)
            .ok_or(ProfileError::NoStore)?
            .id;

        let store = db
            .store_by_id_mut(store_id)
            .ok_or(ProfileError::NoStore)?;
        store.name = name.to_owned();
        store.location = location;
        store.description = description.to_owned();
        let updated = store.clone();

        self.store.save(&db)?;
        self.notifier.notify();
        Ok(updated)
    }

    /// Flip the owner's store between open and closed.
    ///
    /// Returns the new open state.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoStore` if the owner has no listed store.
    pub fn toggle_open(&self, owner_id: UserId) -> Result<bool, ProfileError> {
        let mut db = self.store.load();
        let store_id = db
            .store_for_owner(owner_id)
            .ok_or(ProfileError::NoStore)?
            .id;

        let store = db
            .store_by_id_mut(store_id)
            .ok_or(ProfileError::NoStore)?;
        store.is_open = !store.is_open;
        let is_open = store.is_open;

        self.store.save(&db)?;
        self.notifier.notify();

        info!(%store_id, is_open, "store open state toggled");
        Ok(is_open)
    }

    /// Soft-delete the owner's store.
    ///
    /// The record stays in the aggregate with `is_deleted` set; dishes and
    /// orders referencing it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoStore` if the owner has no listed store.
    pub fn delete_store(&self, owner_id: UserId) -> Result<(), ProfileError> {
        let mut db = self.store.load();
        let store_id = db
            .store_for_owner(owner_id)
            .ok_or(ProfileError::NoStore)?
            .id;

        let store = db
            .store_by_id_mut(store_id)
            .ok_or(ProfileError::NoStore)?;
        store.is_deleted = true;

        self.store.save(&db)?;
        self.notifier.notify();

        info!(%store_id, "store soft-deleted");
        Ok(())
    }
}
