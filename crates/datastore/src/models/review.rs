//! Review record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_canteen_core::{OrderId, Rating, ReviewId, UserId};

/// A buyer's review of one completed order.
///
/// At most one review exists per (order, buyer) pair; reviews are immutable
/// once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub order_id: OrderId,
    pub buyer_id: UserId,
    pub rating: Rating,
    pub comment: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}
