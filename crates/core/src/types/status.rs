//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are created as `Confirmed`. The owning merchant moves a confirmed
/// order to `Completed`; the buyer may move it to `Cancelled` instead.
/// `Pending` is accepted when reading persisted data but no operation
/// produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl OrderStatus {
    /// Whether the order is still in the merchant's queue.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Whether the order has reached a final state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");

        let parsed: OrderStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Completed);
    }

    #[test]
    fn test_pending_still_deserializes() {
        let parsed: OrderStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(parsed, OrderStatus::Pending);
    }

    #[test]
    fn test_progress_and_terminal() {
        assert!(OrderStatus::Confirmed.is_in_progress());
        assert!(!OrderStatus::Completed.is_in_progress());

        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Confirmed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(OrderStatus::Cancelled.to_string(), "CANCELLED");
    }
}
