//! Store and menu browsing.

use thiserror::Error;

use campus_canteen_core::{CampusLocation, StoreId};
use campus_canteen_datastore::models::{Dish, Store};
use campus_canteen_datastore::{DataStore, StoreError};

/// Display name used when a referenced store is missing or soft-deleted.
pub const REMOVED_STORE_NAME: &str = "store removed";

/// Errors that can occur while browsing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested store does not exist or is soft-deleted.
    #[error("store not found")]
    StoreNotFound,

    /// Datastore error.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}

/// Read-side catalog for the student window.
pub struct CatalogService<'a> {
    store: &'a DataStore,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// All listed stores, sorted by name, optionally filtered by location.
    #[must_use]
    pub fn stores(&self, location: Option<CampusLocation>) -> Vec<Store> {
        let db = self.store.load();
        let mut stores: Vec<Store> = db
            .listed_stores()
            .into_iter()
            .filter(|s| location.is_none_or(|l| s.location == l))
            .cloned()
            .collect();
        stores.sort_by(|a, b| a.name.cmp(&b.name));
        stores
    }

    /// A listed store by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::StoreNotFound` if the id is unknown or the
    /// store has been soft-deleted.
    pub fn store(&self, store_id: StoreId) -> Result<Store, CatalogError> {
        let db = self.store.load();
        db.store_by_id(store_id)
            .filter(|s| s.is_listed())
            .cloned()
            .ok_or(CatalogError::StoreNotFound)
    }

    /// The full menu of a store, available dishes or not.
    ///
    /// The store itself may be soft-deleted; its dishes still resolve, so a
    /// view holding stale ids renders instead of failing.
    #[must_use]
    pub fn menu(&self, store_id: StoreId) -> Vec<Dish> {
        let db = self.store.load();
        db.dishes_for(store_id).into_iter().cloned().collect()
    }

    /// A store's display name, with a fixed fallback for dangling ids.
    #[must_use]
    pub fn store_display_name(&self, store_id: StoreId) -> String {
        let db = self.store.load();
        db.store_by_id(store_id)
            .filter(|s| s.is_listed())
            .map_or_else(|| REMOVED_STORE_NAME.to_owned(), |s| s.name.clone())
    }
}
