//! Session liveness record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_canteen_core::WindowId;

/// Liveness record for one logical open window.
///
/// Not tied to any user. Created when a window opens, restamped on every
/// heartbeat tick, and pruned once it goes unrefreshed past the staleness
/// window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub window_id: WindowId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_heartbeat: DateTime<Utc>,
}

impl ActiveSession {
    /// A record stamped `now`.
    #[must_use]
    pub const fn stamped(window_id: WindowId, now: DateTime<Utc>) -> Self {
        Self {
            window_id,
            last_heartbeat: now,
        }
    }

    /// Whether the record has been refreshed within `staleness`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, staleness: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_heartbeat) <= staleness
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_boundary() {
        let now = Utc::now();
        let staleness = chrono::Duration::seconds(15);

        let fresh = ActiveSession::stamped(WindowId::generate(), now - chrono::Duration::seconds(10));
        assert!(fresh.is_fresh(now, staleness));

        let stale = ActiveSession::stamped(WindowId::generate(), now - chrono::Duration::seconds(20));
        assert!(!stale.is_fresh(now, staleness));

        let boundary = ActiveSession::stamped(WindowId::generate(), now - chrono::Duration::seconds(15));
        assert!(boundary.is_fresh(now, staleness));
    }

    #[test]
    fn test_last_heartbeat_serializes_as_epoch_millis() {
        let session = ActiveSession {
            window_id: WindowId::generate(),
            last_heartbeat: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["lastHeartbeat"], 1_700_000_000_000_i64);
    }
}
