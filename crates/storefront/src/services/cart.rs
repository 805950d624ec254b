//! The per-window order cart.

use thiserror::Error;

use campus_canteen_core::{DishId, Price, StoreId};
use campus_canteen_datastore::models::{Dish, Store};

/// Errors that can occur when editing a cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The dish is currently marked unavailable.
    #[error("dish is not available: {name}")]
    DishUnavailable {
        /// Name of the rejected dish.
        name: String,
    },

    /// The store is closed or removed.
    #[error("store is not accepting orders")]
    StoreClosed,

    /// The cart already holds dishes from a different store.
    #[error("cart already holds dishes from another store")]
    MixedStores,
}

/// One cart line.
///
/// Name and price here are display data captured when the line was added;
/// checkout re-reads the live records before snapshotting into the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub dish_id: DishId,
    pub dish_name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

/// An in-memory cart, private to one window.
///
/// All dishes must come from a single store. Adding the same dish again
/// increments its quantity.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    store_id: Option<StoreId>,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The store this cart orders from, once the first dish is added.
    #[must_use]
    pub const fn store_id(&self) -> Option<StoreId> {
        self.store_id
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a dish.
    ///
    /// # Errors
    ///
    /// Returns `CartError::StoreClosed` if the store is closed or removed,
    /// `CartError::DishUnavailable` if the dish is off the menu, and
    /// `CartError::MixedStores` if the cart is already bound to another store.
    pub fn add(&mut self, dish: &Dish, store: &Store) -> Result<(), CartError> {
        if !store.accepts_orders() {
            return Err(CartError::StoreClosed);
        }
        if !dish.is_available {
            return Err(CartError::DishUnavailable {
                name: dish.name.clone(),
            });
        }
        if let Some(bound) = self.store_id {
            if bound != dish.store_id {
                return Err(CartError::MixedStores);
            }
        }

        self.store_id = Some(dish.store_id);
        if let Some(line) = self.lines.iter_mut().find(|l| l.dish_id == dish.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                dish_id: dish.id,
                dish_name: dish.name.clone(),
                unit_price: dish.price,
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Remove a dish's line entirely.
    pub fn remove(&mut self, dish_id: DishId) {
        self.lines.retain(|l| l.dish_id != dish_id);
        if self.lines.is_empty() {
            self.store_id = None;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.store_id = None;
    }

    /// Sum of line totals as currently displayed.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .filter_map(|l| l.unit_price.checked_mul(l.quantity))
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use campus_canteen_core::{CampusLocation, UserId};

    use super::*;

    fn open_store() -> Store {
        Store::new(
            UserId::generate(),
            "Wang's".to_owned(),
            CampusLocation::Xingan,
            String::new(),
        )
    }

    fn dish(store: &Store, name: &str, price: i64) -> Dish {
        Dish::new(
            store.id,
            name.to_owned(),
            Price::from_minor_units(price),
            String::new(),
        )
    }

    #[test]
    fn test_add_accumulates_quantity() {
        let store = open_store();
        let pork = dish(&store, "braised pork rice", 1500);

        let mut cart = Cart::new();
        cart.add(&pork, &store).unwrap();
        cart.add(&pork, &store).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 2);
        assert_eq!(cart.total(), Price::from_minor_units(3000));
    }

    #[test]
    fn test_unavailable_dish_rejected() {
        let store = open_store();
        let mut pork = dish(&store, "braised pork rice", 1500);
        pork.is_available = false;

        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(&pork, &store),
            Err(CartError::DishUnavailable { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_closed_store_rejected() {
        let mut store = open_store();
        store.is_open = false;
        let pork = dish(&store, "braised pork rice", 1500);

        let mut cart = Cart::new();
        assert!(matches!(cart.add(&pork, &store), Err(CartError::StoreClosed)));
    }

    #[test]
    fn test_mixed_stores_rejected() {
        let first = open_store();
        let second = open_store();
        let pork = dish(&first, "braised pork rice", 1500);
        let noodles = dish(&second, "dan dan noodles", 1200);

        let mut cart = Cart::new();
        cart.add(&pork, &first).unwrap();
        assert!(matches!(
            cart.add(&noodles, &second),
            Err(CartError::MixedStores)
        ));
    }

    #[test]
    fn test_remove_last_line_unbinds_store() {
        let store = open_store();
        let pork = dish(&store, "braised pork rice", 1500);

        let mut cart = Cart::new();
        cart.add(&pork, &store).unwrap();
        assert!(cart.store_id().is_some());

        cart.remove(pork.id);
        assert!(cart.is_empty());
        assert!(cart.store_id().is_none());
    }
}
