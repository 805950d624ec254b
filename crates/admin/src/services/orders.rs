//! Order fulfillment for the merchant side.

use thiserror::Error;
use tracing::info;

use campus_canteen_core::{OrderId, OrderStatus, UserId};
use campus_canteen_datastore::models::Order;
use campus_canteen_datastore::{ChangeNotifier, DataStore, StoreError};

/// Which slice of the order list a view wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    /// Every order, regardless of status.
    #[default]
    All,
    /// Orders waiting on the kitchen (`CONFIRMED`).
    InProgress,
    /// Finished orders (`COMPLETED`).
    Completed,
}

impl OrderFilter {
    const fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::InProgress => status.is_in_progress(),
            Self::Completed => matches!(status, OrderStatus::Completed),
        }
    }
}

/// Errors that can occur when working the order queue.
#[derive(Debug, Error)]
pub enum MerchantOrderError {
    /// The owner has no listed store.
    #[error("account owns no store")]
    NoStore,

    /// The order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// The order was placed against another store.
    #[error("order belongs to another store")]
    NotYourOrder,

    /// The order is not in a state this operation accepts.
    #[error("order is {status}, expected CONFIRMED")]
    InvalidTransition {
        /// The order's actual status.
        status: OrderStatus,
    },

    /// Datastore error.
    #[error("datastore error: {0}")]
    Store(#[from] StoreError),
}

/// Order queue operations for the merchant window.
pub struct MerchantOrderService<'a> {
    store: &'a DataStore,
    notifier: &'a ChangeNotifier,
}

impl<'a> MerchantOrderService<'a> {
    /// Create a new merchant order service.
    #[must_use]
    pub const fn new(store: &'a DataStore, notifier: &'a ChangeNotifier) -> Self {
        Self { store, notifier }
    }

    /// The owner's store orders, newest first, narrowed by `filter`.
    ///
    /// # Errors
    ///
    /// Returns `MerchantOrderError::NoStore` if the owner has no listed store.
    pub fn orders(
        &self,
        owner_id: UserId,
        filter: OrderFilter,
    ) -> Result<Vec<Order>, MerchantOrderError> {
        let db = self.store.load();
        let store_id = db
            .store_for_owner(owner_id)
            .ok_or(MerchantOrderError::NoStore)?
            .id;

        let mut orders: Vec<Order> = db
            .orders_for_store(store_id)
            .into_iter()
            .filter(|o| filter.matches(o.status))
            .cloned()
            .collect();
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }

    /// Mark one of the owner's confirmed orders as completed.
    ///
    /// `CONFIRMED -> COMPLETED` is the only transition the merchant side
    /// performs; anything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns `MerchantOrderError::OrderNotFound`, `NotYourOrder`, or
    /// `InvalidTransition` when the order cannot be completed.
    pub fn complete(&self, owner_id: UserId, order_id: OrderId) -> Result<(), MerchantOrderError> {
        let mut db = self.store.load();
        let store_id = db
            .store_for_owner(owner_id)
            .ok_or(MerchantOrderError::NoStore)?
            .id;

        let order = db
            .order_by_id_mut(order_id)
            .ok_or(MerchantOrderError::OrderNotFound)?;
        if order.store_id != store_id {
            return Err(MerchantOrderError::NotYourOrder);
        }
        if order.status != OrderStatus::Confirmed {
            return Err(MerchantOrderError::InvalidTransition {
                status: order.status,
            });
        }

        order.status = OrderStatus::Completed;
        self.store.save(&db)?;
        self.notifier.notify();

        info!(%order_id, "order completed");
        Ok(())
    }
}
