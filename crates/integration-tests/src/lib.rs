//! Integration tests for Campus Canteen.
//!
//! All tests run against an in-memory backend (or a temp file where
//! persistence itself is under test), so the suite needs no network, no
//! API keys, and no pre-existing state.
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration and login scenarios
//! - `ordering_flow` - Menu, cart, checkout, fulfillment, cancellation
//! - `review_gating` - Review submission rules
//! - `heartbeat` - Session liveness reconciliation
//! - `persistence` - Blob round-trips through the file backend
//! - `forecast_fallback` - Synthetic demand forecast guarantees

#![cfg_attr(not(test), forbid(unsafe_code))]

use campus_canteen_admin::{MenuService, StoreProfileService};
use campus_canteen_core::{CampusLocation, Price};
use campus_canteen_datastore::models::{Dish, Store, User};
use campus_canteen_datastore::{ChangeNotifier, DataStore};
use campus_canteen_storefront::AuthService;

/// Shared wiring for one test: an in-memory store plus a notifier.
pub struct TestContext {
    pub store: DataStore,
    pub notifier: ChangeNotifier,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A fresh, empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: DataStore::in_memory(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Register a student account.
    ///
    /// # Panics
    ///
    /// Panics if registration fails; fixtures are expected to be valid.
    #[must_use]
    pub fn student(&self, username: &str) -> User {
        AuthService::new(&self.store)
            .register(username, "student-pw", false)
            .expect("student registration")
    }

    /// Register a merchant account with one open store.
    ///
    /// # Panics
    ///
    /// Panics if any fixture step fails.
    #[must_use]
    pub fn merchant_with_store(&self, username: &str, store_name: &str) -> (User, Store) {
        let merchant = AuthService::new(&self.store)
            .register(username, "merchant-pw", true)
            .expect("merchant registration");
        let store = StoreProfileService::new(&self.store, &self.notifier)
            .create_store(merchant.id, store_name, CampusLocation::Xingan, "")
            .expect("store creation");
        (merchant, store)
    }

    /// Put a dish on a merchant's menu.
    ///
    /// # Panics
    ///
    /// Panics if the dish cannot be added.
    #[must_use]
    pub fn dish(&self, owner: &User, name: &str, price_minor_units: i64) -> Dish {
        MenuService::new(&self.store, &self.notifier)
            .add_dish(
                owner.id,
                name,
                Price::from_minor_units(price_minor_units),
                "",
            )
            .expect("dish creation")
    }
}
