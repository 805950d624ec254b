//! Menu management.

use thiserror::Error;
use tracing::info;

use campus_canteen_core::{DishId, Price, UserId};
use campus_canteen_datastore::models::Dish;
use campus_canteen_datastore::{ChangeNotifier, DataStore, StoreError};

/// Errors that can occur when managing a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The owner has no listed store.
    #[error("account owns no store")]
    NoStore,

    /// The dish name is empty.
    #[error("dish name cannot be empty")]
    EmptyName,

    /// The price is zero or negative.
    #[error("dish price must be positive")]
    NonPositivePrice,

    /// The dish does not exist.
    #[error("dish not found")]
    DishNotFound,

    /// The dish belongs to a different store.
    #[error("dish belongs to another store")]
    NotYourDish,

    /// Datastore error.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}

/// Menu management for the merchant window.
pub struct MenuService<'a> {
    store: &'a DataStore,
    notifier: &'a ChangeNotifier,
}

impl<'a> MenuService<'a> {
    /// Create a new menu service.
    #[must_use]
    pub const fn new(store: &'a DataStore, notifier: &'a ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    /// Put a new dish on the owner's menu, available immediately.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::NoStore` if the owner has no listed store,
    /// `EmptyName` for a blank name, and `NonPositivePrice` for a price
    /// of zero or less.
    pub fn add_dish(
        &self,
        owner_id: UserId,
        name: &str,
        price: Price,
        description: &str,
    ) -> Result<Dish, MenuError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MenuError::EmptyName);
        }
        if !price.is_positive() {
            return Err(MenuError::NonPositivePrice);
        }

        let mut db = self.store.load();
        let store_id = db.store_for_owner(owner_id).ok_or(MenuError::NoStore)?.id;

        let dish = Dish::new(store_id, name.to_owned(), price, description.to_owned());
        db.dishes.push(dish.clone());
        self.store.save(&db)?;
        self.notifier.notify();

        info!(dish_id = %dish.id, name = %dish.name, price = %dish.price, "dish added");
        Ok(dish)
    }

    /// The owner's full menu.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::NoStore` if the owner has no listed store.
    pub fn menu(&self, owner_id: UserId) -> Result<Vec<Dish>, MenuError> {
        let db = self.store.load();
        let store_id = db.store_for_owner(owner_id).ok_or(MenuError::NoStore)?.id;
        Ok(db.dishes_for(store_id).into_iter().cloned().collect())
    }

    /// Flip a dish between available and unavailable.
    ///
    /// Returns the new availability.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::DishNotFound` for unknown dishes and
    /// `NotYourDish` when the dish belongs to another store.
    pub fn toggle_availability(
        &self,
        owner_id: UserId,
        dish_id: DishId,
    ) -> Result<bool, MenuError> {
        let mut db = self.store.load();
        let store_id = db.store_for_owner(owner_id).ok_or(MenuError::NoStore)?.id;

        let dish = db.dish_by_id_mut(dish_id).ok_or(MenuError::DishNotFound)?;
        if dish.store_id != store_id {
            return Err(MenuError::NotYourDish);
        }

        dish.is_available = !dish.is_available;
        let is_available = dish.is_available;

        self.store.save(&db)?;
        self.notifier.notify();

        info!(%dish_id, is_available, "dish availability toggled");
        Ok(is_available)
    }

    /// Update a dish's price and description.
    ///
    /// Existing orders keep the name/price snapshots taken at checkout;
    /// this only affects future carts.
    ///
    /// # Errors
    ///
    /// Returns the same ownership errors as
    /// [`toggle_availability`](Self::toggle_availability), plus
    /// `NonPositivePrice` for a price of zero or less.
    pub fn update_dish(
        &self,
        owner_id: UserId,
        dish_id: DishId,
        price: Price,
        description: &str,
    ) -> Result<Dish, MenuError> {
        if !price.is_positive() {
            return Err(MenuError::NonPositivePrice);
        }

        let mut db = self.store.load();
        let store_id = db.store_for_owner(owner_id).ok_or(MenuError::NoStore)?.id;

        let dish = db.dish_by_id_mut(dish_id).ok_or(MenuError::DishNotFound)?;
        if dish.store_id != store_id {
            return Err(MenuError::NotYourDish);
        }

        dish.price = price;
        dish.description = description.to_owned();
        let updated = dish.clone();

        self.store.save(&db)?;
        self.notifier.notify();
        Ok(updated)
    }
}
