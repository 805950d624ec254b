//! Dish record.

use serde::{Deserialize, Serialize};

use campus_canteen_core::{DishId, Price, StoreId};

/// A menu item belonging to exactly one store.
///
/// The `store_id` reference is weak; soft-deleting the store does not touch
/// its dishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: DishId,
    pub store_id: StoreId,
    pub name: String,
    pub price: Price,
    pub image_ref: String,
    pub description: String,
    pub is_available: bool,
}

impl Dish {
    /// Create a new available dish with a fresh id and a derived image reference.
    #[must_use]
    pub fn new(store_id: StoreId, name: String, price: Price, description: String) -> Self {
        let image_ref = format!("https://picsum.photos/seed/{name}/300/200");
        Self {
            id: DishId::generate(),
            store_id,
            name,
            price,
            image_ref,
            description,
            is_available: true,
        }
    }
}
