//! Sales analytics over the order history.
//!
//! Pure computations: callers load the orders they care about and hand them
//! in together with `now`, which makes every figure reproducible in tests.

use chrono::{DateTime, Timelike, Utc};

use campus_canteen_core::{OrderStatus, Price};
use campus_canteen_datastore::models::Order;

/// How many trailing hourly buckets the dashboard shows.
const HOURLY_BUCKETS: i64 = 6;

/// Revenue and volume for one clock hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyBucket {
    /// Label like "14:00".
    pub label: String,
    /// Revenue from orders created in this hour.
    pub revenue: Price,
    /// Number of orders created in this hour.
    pub orders: usize,
}

/// The merchant dashboard's headline figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    /// Revenue across all non-cancelled orders.
    pub total_revenue: Price,
    /// Number of completed orders.
    pub completed_orders: usize,
    /// Average order value across non-cancelled orders.
    pub average_order_value: Price,
    /// Trailing hourly revenue/volume, oldest hour first.
    pub hourly: Vec<HourlyBucket>,
}

impl SalesSummary {
    /// Compute the summary for a store's orders as of `now`.
    ///
    /// Cancelled orders count toward neither revenue nor the hourly
    /// buckets.
    #[must_use]
    pub fn compute(orders: &[Order], now: DateTime<Utc>) -> Self {
        let counted: Vec<&Order> = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .collect();

        let total_revenue: Price = counted.iter().map(|o| o.total_price).sum();
        let completed_orders = counted
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .count();

        let average_order_value = if counted.is_empty() {
            Price::ZERO
        } else {
            Price::from_minor_units(
                total_revenue.minor_units() / i64::try_from(counted.len()).unwrap_or(1),
            )
        };

        let mut hourly = Vec::with_capacity(usize::try_from(HOURLY_BUCKETS).unwrap_or(6));
        for back in (0..HOURLY_BUCKETS).rev() {
            let hour_start = (now - chrono::Duration::hours(back))
                .with_minute(0)
                .and_then(|t| t.with_second(0))
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(now);
            let hour_end = hour_start + chrono::Duration::hours(1);

            let in_hour: Vec<&&Order> = counted
                .iter()
                .filter(|o| o.created_at >= hour_start && o.created_at < hour_end)
                .collect();

            hourly.push(HourlyBucket {
                label: format!("{}:00", hour_start.hour()),
                revenue: in_hour.iter().map(|o| o.total_price).sum(),
                orders: in_hour.len(),
            });
        }

        Self {
            total_revenue,
            completed_orders,
            average_order_value,
            hourly,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use campus_canteen_core::{OrderId, StoreId, UserId};

    use super::*;

    fn order(total: i64, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
        Order {
            id: OrderId::generate(),
            buyer_id: UserId::generate(),
            store_id: StoreId::generate(),
            items: vec![],
            total_price: Price::from_minor_units(total),
            status,
            created_at,
        }
    }

    #[test]
    fn test_totals_and_average() {
        let now = Utc::now();
        let orders = vec![
            order(1000, OrderStatus::Completed, now),
            order(3000, OrderStatus::Confirmed, now),
        ];

        let summary = SalesSummary::compute(&orders, now);
        assert_eq!(summary.total_revenue, Price::from_minor_units(4000));
        assert_eq!(summary.completed_orders, 1);
        assert_eq!(summary.average_order_value, Price::from_minor_units(2000));
    }

    #[test]
    fn test_cancelled_orders_do_not_count() {
        let now = Utc::now();
        let orders = vec![
            order(1000, OrderStatus::Completed, now),
            order(9000, OrderStatus::Cancelled, now),
        ];

        let summary = SalesSummary::compute(&orders, now);
        assert_eq!(summary.total_revenue, Price::from_minor_units(1000));
        assert_eq!(summary.average_order_value, Price::from_minor_units(1000));
    }

    #[test]
    fn test_empty_orders() {
        let summary = SalesSummary::compute(&[], Utc::now());
        assert_eq!(summary.total_revenue, Price::ZERO);
        assert_eq!(summary.average_order_value, Price::ZERO);
        assert_eq!(summary.hourly.len(), 6);
        assert!(summary.hourly.iter().all(|b| b.orders == 0));
    }

    #[test]
    fn test_hourly_bucketing() {
        let now = Utc::now();
        let orders = vec![
            order(1000, OrderStatus::Completed, now),
            order(2000, OrderStatus::Completed, now - chrono::Duration::hours(2)),
            // Outside the six-hour window.
            order(5000, OrderStatus::Completed, now - chrono::Duration::hours(9)),
        ];

        let summary = SalesSummary::compute(&orders, now);
        assert_eq!(summary.hourly.len(), 6);

        let bucketed_revenue: i64 = summary
            .hourly
            .iter()
            .map(|b| b.revenue.minor_units())
            .sum();
        assert_eq!(bucketed_revenue, 3000);

        let latest = summary.hourly.last().unwrap();
        assert_eq!(latest.revenue, Price::from_minor_units(1000));
        assert_eq!(latest.orders, 1);
    }
}
