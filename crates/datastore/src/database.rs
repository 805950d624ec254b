//! The persisted aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_canteen_core::{DishId, OrderId, StoreId, UserId, WindowId};

use crate::models::{ActiveSession, Dish, Order, Review, Store, User};

/// The whole persisted state: six collections under one root.
///
/// Records live and die with the aggregate; there is no per-record
/// lifecycle outside it. Lookups are linear scans, which is fine at the
/// scale of one local installation.
///
/// The read helpers on this type are pure: they never mutate and never
/// persist. Mutation happens by editing a loaded copy and handing it back
/// to [`DataStore::save`](crate::DataStore::save).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Database {
    pub users: Vec<User>,
    pub stores: Vec<Store>,
    pub dishes: Vec<Dish>,
    pub orders: Vec<Order>,
    pub reviews: Vec<Review>,
    pub sessions: Vec<ActiveSession>,
}

impl Database {
    // =========================================================================
    // Users
    // =========================================================================

    /// Find a user by exact username match.
    #[must_use]
    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username.as_str() == username)
    }

    /// Find a user by id.
    #[must_use]
    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// All stores that have not been soft-deleted.
    #[must_use]
    pub fn listed_stores(&self) -> Vec<&Store> {
        self.stores.iter().filter(|s| s.is_listed()).collect()
    }

    /// Find a store by id, including soft-deleted ones.
    #[must_use]
    pub fn store_by_id(&self, id: StoreId) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    /// The owner's listed store, if any.
    #[must_use]
    pub fn store_for_owner(&self, owner_id: UserId) -> Option<&Store> {
        self.stores
            .iter()
            .find(|s| s.owner_id == owner_id && s.is_listed())
    }

    /// Mutable access to a store by id.
    #[must_use]
    pub fn store_by_id_mut(&mut self, id: StoreId) -> Option<&mut Store> {
        self.stores.iter_mut().find(|s| s.id == id)
    }

    /// How many listed stores are currently open.
    #[must_use]
    pub fn open_store_count(&self) -> usize {
        self.stores.iter().filter(|s| s.accepts_orders()).count()
    }

    // =========================================================================
    // Dishes
    // =========================================================================

    /// All dishes belonging to a store.
    #[must_use]
    pub fn dishes_for(&self, store_id: StoreId) -> Vec<&Dish> {
        self.dishes
            .iter()
            .filter(|d| d.store_id == store_id)
            .collect()
    }

    /// Find a dish by id.
    #[must_use]
    pub fn dish_by_id(&self, id: DishId) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    /// Mutable access to a dish by id.
    #[must_use]
    pub fn dish_by_id_mut(&mut self, id: DishId) -> Option<&mut Dish> {
        self.dishes.iter_mut().find(|d| d.id == id)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// All orders placed against a store.
    #[must_use]
    pub fn orders_for_store(&self, store_id: StoreId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.store_id == store_id)
            .collect()
    }

    /// All orders placed by a buyer.
    #[must_use]
    pub fn orders_for_buyer(&self, buyer_id: UserId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.buyer_id == buyer_id)
            .collect()
    }

    /// Find an order by id.
    #[must_use]
    pub fn order_by_id(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Mutable access to an order by id.
    #[must_use]
    pub fn order_by_id_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    /// How many orders were created at or after `since`.
    #[must_use]
    pub fn orders_since(&self, since: DateTime<Utc>) -> usize {
        self.orders.iter().filter(|o| o.created_at >= since).count()
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    /// The review a buyer left on an order, if any.
    #[must_use]
    pub fn review_for(&self, order_id: OrderId, buyer_id: UserId) -> Option<&Review> {
        self.reviews
            .iter()
            .find(|r| r.order_id == order_id && r.buyer_id == buyer_id)
    }

    /// All reviews written by a buyer.
    #[must_use]
    pub fn reviews_for_buyer(&self, buyer_id: UserId) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.buyer_id == buyer_id)
            .collect()
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// How many session records heartbeated within `window` before `now`.
    #[must_use]
    pub fn active_session_count(&self, now: DateTime<Utc>, window: chrono::Duration) -> usize {
        self.sessions
            .iter()
            .filter(|s| s.is_fresh(now, window))
            .count()
    }

    /// Find a session record by window id.
    #[must_use]
    pub fn session_for(&self, window_id: WindowId) -> Option<&ActiveSession> {
        self.sessions.iter().find(|s| s.window_id == window_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use campus_canteen_core::{CampusLocation, Price, Username};

    use super::*;

    fn sample() -> Database {
        let mut db = Database::default();
        let owner = User::new(Username::parse("laowang").unwrap(), "pw", true);
        let owner_id = owner.id;
        db.users.push(owner);

        let store = Store::new(
            owner_id,
            "Wang's Braised Pork".to_owned(),
            CampusLocation::Xingan,
            "slow-cooked daily".to_owned(),
        );
        let store_id = store.id;
        db.stores.push(store);

        db.dishes.push(Dish::new(
            store_id,
            "braised pork rice".to_owned(),
            Price::from_minor_units(1500),
            "house special".to_owned(),
        ));
        db
    }

    #[test]
    fn test_find_user_exact_match() {
        let db = sample();
        assert!(db.find_user("laowang").is_some());
        assert!(db.find_user("Laowang").is_none());
        assert!(db.find_user("laowan").is_none());
    }

    #[test]
    fn test_listed_stores_excludes_soft_deleted() {
        let mut db = sample();
        assert_eq!(db.listed_stores().len(), 1);

        let id = db.stores.first().unwrap().id;
        db.store_by_id_mut(id).unwrap().is_deleted = true;
        assert!(db.listed_stores().is_empty());
        // Soft-deleted stores stay reachable by id.
        assert!(db.store_by_id(id).is_some());
        // Dishes are not cascaded.
        assert_eq!(db.dishes_for(id).len(), 1);
    }

    #[test]
    fn test_store_for_owner_ignores_deleted() {
        let mut db = sample();
        let owner_id = db.users.first().unwrap().id;
        assert!(db.store_for_owner(owner_id).is_some());

        let id = db.stores.first().unwrap().id;
        db.store_by_id_mut(id).unwrap().is_deleted = true;
        assert!(db.store_for_owner(owner_id).is_none());
    }

    #[test]
    fn test_open_store_count() {
        let mut db = sample();
        assert_eq!(db.open_store_count(), 1);

        let id = db.stores.first().unwrap().id;
        db.store_by_id_mut(id).unwrap().is_open = false;
        assert_eq!(db.open_store_count(), 0);
    }

    #[test]
    fn test_empty_aggregate_deserializes_from_empty_object() {
        let db: Database = serde_json::from_str("{}").unwrap();
        assert!(db.users.is_empty());
        assert!(db.sessions.is_empty());
    }

    #[test]
    fn test_collections_serialize_camel_case() {
        let json = serde_json::to_value(Database::default()).unwrap();
        for key in ["users", "stores", "dishes", "orders", "reviews", "sessions"] {
            assert!(json.get(key).is_some(), "missing collection {key}");
        }
    }
}
