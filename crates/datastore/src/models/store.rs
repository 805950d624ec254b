//! Store record.

use serde::{Deserialize, Serialize};

use campus_canteen_core::{CampusLocation, StoreId, UserId};

/// A merchant's store.
///
/// Stores are only ever soft-deleted: `is_deleted` flips to `true` and the
/// record stays in the aggregate. Dishes referencing a soft-deleted store
/// are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub owner_id: UserId,
    pub name: String,
    pub location: CampusLocation,
    pub image_ref: String,
    pub description: String,
    pub is_open: bool,
    pub is_deleted: bool,
}

impl Store {
    /// Create a new open store with a fresh id and a derived image reference.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        name: String,
        location: CampusLocation,
        description: String,
    ) -> Self {
        let image_ref = format!("https://picsum.photos/seed/{name}/400/300");
        Self {
            id: StoreId::generate(),
            owner_id,
            name,
            location,
            image_ref,
            description,
            is_open: true,
            is_deleted: false,
        }
    }

    /// Whether the store shows up in listings at all.
    #[must_use]
    pub const fn is_listed(&self) -> bool {
        !self.is_deleted
    }

    /// Whether the store is currently accepting orders.
    #[must_use]
    pub const fn accepts_orders(&self) -> bool {
        self.is_listed() && self.is_open
    }
}
