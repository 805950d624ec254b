//! Order record and its line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_canteen_core::{DishId, OrderId, OrderStatus, Price, StoreId, UserId};

/// One line of an order.
///
/// `dish_name` and `unit_price` are snapshots taken when the order was
/// placed. Later edits to the dish record never touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub dish_id: DishId,
    pub dish_name: String,
    pub quantity: u32,
    pub unit_price: Price,
}

impl OrderItem {
    /// `unit_price × quantity`, `None` on overflow.
    #[must_use]
    pub const fn line_total(&self) -> Option<Price> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// A placed order.
///
/// `total_price` is computed once at creation from the item snapshots and
/// never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: UserId,
    pub store_id: StoreId,
    pub items: Vec<OrderItem>,
    pub total_price: Price,
    pub status: OrderStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Recompute the sum of line totals, `None` on overflow.
    ///
    /// This exists for validation and tests; `total_price` itself stays
    /// whatever was written at creation.
    #[must_use]
    pub fn computed_total(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            dish_id: DishId::generate(),
            dish_name: "braised pork rice".to_owned(),
            quantity,
            unit_price: Price::from_minor_units(price),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(
            item(500, 2).line_total().unwrap(),
            Price::from_minor_units(1000)
        );
    }

    #[test]
    fn test_computed_total_sums_lines() {
        let order = Order {
            id: OrderId::generate(),
            buyer_id: UserId::generate(),
            store_id: StoreId::generate(),
            items: vec![item(500, 2), item(1200, 1)],
            total_price: Price::from_minor_units(2200),
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };
        assert_eq!(
            order.computed_total().unwrap(),
            Price::from_minor_units(2200)
        );
    }

    #[test]
    fn test_created_at_serializes_as_epoch_millis() {
        let order = Order {
            id: OrderId::generate(),
            buyer_id: UserId::generate(),
            store_id: StoreId::generate(),
            items: vec![],
            total_price: Price::ZERO,
            status: OrderStatus::Confirmed,
            created_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
    }
}
