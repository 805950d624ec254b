//! Checkout, order history, and cancellation.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use campus_canteen_core::{OrderId, OrderStatus, Price, UserId};
use campus_canteen_datastore::models::{Order, OrderItem};
use campus_canteen_datastore::{ChangeNotifier, DataStore, StoreError};

use super::cart::Cart;

/// Errors that can occur when placing or cancelling orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The store is closed or removed.
    #[error("store is not accepting orders")]
    StoreUnavailable,

    /// A cart line references a dish that no longer exists.
    #[error("dish no longer exists")]
    UnknownDish,

    /// A cart line references a dish that is currently unavailable.
    #[error("dish is not available: {name}")]
    DishUnavailable {
        /// Name of the rejected dish.
        name: String,
    },

    /// The order total overflowed.
    #[error("order total out of range")]
    TotalOutOfRange,

    /// The order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// The order belongs to a different buyer.
    #[error("order belongs to another account")]
    NotYourOrder,

    /// The order is not in a state this operation accepts.
    #[error("order is {status}, expected CONFIRMED")]
    InvalidStatus {
        /// The order's actual status.
        status: OrderStatus,
    },

    /// Datastore error.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}

/// Order placement and history for the student window.
pub struct OrderService<'a> {
    store: &'a DataStore,
    notifier: &'a ChangeNotifier,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(store: &'a DataStore, notifier: &'a ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    /// Place an order from the cart's lines.
    ///
    /// The store and every dish are revalidated against a fresh load, and
    /// name/price snapshots are taken from those fresh records, so the
    /// validation and the snapshot come from the same read. The total is
    /// computed once here and never recomputed. The new order is written as
    /// `CONFIRMED` and a change signal is broadcast.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` when there is nothing to order, and
    /// the validation errors above when the menu moved under the cart.
    pub fn checkout(&self, buyer_id: UserId, cart: &Cart) -> Result<Order, OrderError> {
        let store_id = cart.store_id().ok_or(OrderError::EmptyCart)?;
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let mut db = self.store.load();

        let store = db
            .store_by_id(store_id)
            .filter(|s| s.accepts_orders())
            .ok_or(OrderError::StoreUnavailable)?;
        let store_id = store.id;

        let mut items = Vec::with_capacity(cart.lines().len());
        let mut total = Price::ZERO;
        for line in cart.lines() {
            let dish = db
                .dish_by_id(line.dish_id)
                .filter(|d| d.store_id == store_id)
                .ok_or(OrderError::UnknownDish)?;
            if !dish.is_available {
                return Err(OrderError::DishUnavailable {
                    name: dish.name.clone(),
                });
            }

            let item = OrderItem {
                dish_id: dish.id,
                dish_name: dish.name.clone(),
                quantity: line.quantity,
                unit_price: dish.price,
            };
            let line_total = item.line_total().ok_or(OrderError::TotalOutOfRange)?;
            total = total
                .checked_add(line_total)
                .ok_or(OrderError::TotalOutOfRange)?;
            items.push(item);
        }

        let order = Order {
            id: OrderId::generate(),
            buyer_id,
            store_id,
            items,
            total_price: total,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };

        db.orders.push(order.clone());
        self.store.save(&db)?;
        self.notifier.notify();

        info!(order_id = %order.id, total = %order.total_price, "order placed");
        Ok(order)
    }

    /// The buyer's orders, newest first.
    #[must_use]
    pub fn history(&self, buyer_id: UserId) -> Vec<Order> {
        let db = self.store.load();
        let mut orders: Vec<Order> = db.orders_for_buyer(buyer_id).into_iter().cloned().collect();
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        orders
    }

    /// Cancel one of the buyer's own confirmed orders.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::OrderNotFound`, `OrderError::NotYourOrder`, or
    /// `OrderError::InvalidStatus` when the order cannot be cancelled.
    pub fn cancel(&self, buyer_id: UserId, order_id: OrderId) -> Result<(), OrderError> {
        let mut db = self.store.load();

        let order = db
            .order_by_id_mut(order_id)
            .ok_or(OrderError::OrderNotFound)?;
        if order.buyer_id != buyer_id {
            return Err(OrderError::NotYourOrder);
        }
        if order.status != OrderStatus::Confirmed {
            return Err(OrderError::InvalidStatus {
                status: order.status,
            });
        }

        order.status = OrderStatus::Cancelled;
        self.store.save(&db)?;
        self.notifier.notify();

        info!(%order_id, "order cancelled");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use campus_canteen_core::CampusLocation;
    use campus_canteen_datastore::models::{Dish, Store};

    use super::*;

    struct Fixture {
        store: DataStore,
        notifier: ChangeNotifier,
        buyer: UserId,
        dish: Dish,
        shop: Store,
    }

    fn fixture() -> Fixture {
        let store = DataStore::in_memory();
        let shop = Store::new(
            UserId::generate(),
            "Wang's".to_owned(),
            CampusLocation::Xingan,
            String::new(),
        );
        let dish = Dish::new(
            shop.id,
            "braised pork rice".to_owned(),
            Price::from_minor_units(500),
            String::new(),
        );

        let mut db = store.load();
        db.stores.push(shop.clone());
        db.dishes.push(dish.clone());
        store.save(&db).unwrap();

        Fixture {
            store,
            notifier: ChangeNotifier::new(),
            buyer: UserId::generate(),
            dish,
            shop,
        }
    }

    fn cart_with(fx: &Fixture, quantity: u32) -> Cart {
        let mut cart = Cart::new();
        for _ in 0..quantity {
            cart.add(&fx.dish, &fx.shop).unwrap();
        }
        cart
    }

    #[test]
    fn test_checkout_totals_and_snapshots() {
        let fx = fixture();
        let second = Dish::new(
            fx.shop.id,
            "dan dan noodles".to_owned(),
            Price::from_minor_units(1200),
            String::new(),
        );
        let mut db = fx.store.load();
        db.dishes.push(second.clone());
        fx.store.save(&db).unwrap();

        let mut cart = cart_with(&fx, 2);
        cart.add(&second, &fx.shop).unwrap();

        let orders = OrderService::new(&fx.store, &fx.notifier);
        let order = orders.checkout(fx.buyer, &cart).unwrap();

        assert_eq!(order.total_price, Price::from_minor_units(2200));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items.len(), 2);
        assert_eq!(
            order.items.first().unwrap().dish_name,
            "braised pork rice"
        );
    }

    #[test]
    fn test_total_survives_later_price_edit() {
        let fx = fixture();
        let orders = OrderService::new(&fx.store, &fx.notifier);
        let order = orders.checkout(fx.buyer, &cart_with(&fx, 2)).unwrap();

        let mut db = fx.store.load();
        db.dish_by_id_mut(fx.dish.id).unwrap().price = Price::from_minor_units(9900);
        fx.store.save(&db).unwrap();

        let stored = fx.store.load().order_by_id(order.id).unwrap().clone();
        assert_eq!(stored.total_price, Price::from_minor_units(1000));
        assert_eq!(
            stored.items.first().unwrap().unit_price,
            Price::from_minor_units(500)
        );
    }

    #[test]
    fn test_empty_cart_rejected() {
        let fx = fixture();
        let orders = OrderService::new(&fx.store, &fx.notifier);
        assert!(matches!(
            orders.checkout(fx.buyer, &Cart::new()),
            Err(OrderError::EmptyCart)
        ));
    }

    #[test]
    fn test_checkout_rechecks_availability() {
        let fx = fixture();
        let cart = cart_with(&fx, 1);

        // The dish goes off the menu after it entered the cart.
        let mut db = fx.store.load();
        db.dish_by_id_mut(fx.dish.id).unwrap().is_available = false;
        fx.store.save(&db).unwrap();

        let orders = OrderService::new(&fx.store, &fx.notifier);
        assert!(matches!(
            orders.checkout(fx.buyer, &cart),
            Err(OrderError::DishUnavailable { .. })
        ));
        assert!(fx.store.load().orders.is_empty());
    }

    #[test]
    fn test_checkout_rechecks_store_state() {
        let fx = fixture();
        let cart = cart_with(&fx, 1);

        let mut db = fx.store.load();
        db.store_by_id_mut(fx.shop.id).unwrap().is_open = false;
        fx.store.save(&db).unwrap();

        let orders = OrderService::new(&fx.store, &fx.notifier);
        assert!(matches!(
            orders.checkout(fx.buyer, &cart),
            Err(OrderError::StoreUnavailable)
        ));
    }

    #[test]
    fn test_checkout_notifies() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let fx = fixture();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let _sub = fx.notifier.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let orders = OrderService::new(&fx.store, &fx.notifier);
        orders.checkout(fx.buyer, &cart_with(&fx, 1)).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_own_confirmed_order() {
        let fx = fixture();
        let orders = OrderService::new(&fx.store, &fx.notifier);
        let order = orders.checkout(fx.buyer, &cart_with(&fx, 1)).unwrap();

        orders.cancel(fx.buyer, order.id).unwrap();
        assert_eq!(
            fx.store.load().order_by_id(order.id).unwrap().status,
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_cancel_rejects_foreign_and_terminal_orders() {
        let fx = fixture();
        let orders = OrderService::new(&fx.store, &fx.notifier);
        let order = orders.checkout(fx.buyer, &cart_with(&fx, 1)).unwrap();

        assert!(matches!(
            orders.cancel(UserId::generate(), order.id),
            Err(OrderError::NotYourOrder)
        ));

        orders.cancel(fx.buyer, order.id).unwrap();
        assert!(matches!(
            orders.cancel(fx.buyer, order.id),
            Err(OrderError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_history_newest_first() {
        let fx = fixture();
        let orders = OrderService::new(&fx.store, &fx.notifier);
        let first = orders.checkout(fx.buyer, &cart_with(&fx, 1)).unwrap();
        let second = orders.checkout(fx.buyer, &cart_with(&fx, 2)).unwrap();

        // Force distinct timestamps regardless of clock resolution.
        let mut db = fx.store.load();
        db.order_by_id_mut(first.id).unwrap().created_at =
            Utc::now() - chrono::Duration::minutes(5);
        fx.store.save(&db).unwrap();

        let history = orders.history(fx.buyer);
        assert_eq!(history.len(), 2);
        assert_eq!(history.first().unwrap().id, second.id);
    }
}
