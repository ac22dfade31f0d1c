//! # Restock Quota Policy
//!
//! Decides whether an item may be restocked again, given how many restocks
//! it already received in the trailing window.
//!
//! ## Window
//! ```text
//!        window_start = now - 24h (excluded)                now
//!              │                                             │
//!   ───────────○━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━●──────►
//!     ignored  │  counted: created_at > window_start          │
//! ```
//!
//! The window trails the moment of the new attempt; it is not aligned to
//! calendar days. The count itself is taken from storage on every attempt,
//! so there is no in-memory counter to go stale.

use chrono::{DateTime, Duration, Utc};

use crate::{MAX_RESTOCKS_PER_WINDOW, RESTOCK_WINDOW_HOURS};

/// Rolling-window restock limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestockQuota {
    window: Duration,
    max_restocks: i64,
}

impl RestockQuota {
    /// Creates a quota of `max_restocks` per `window`.
    pub fn new(window: Duration, max_restocks: i64) -> Self {
        RestockQuota {
            window,
            max_restocks,
        }
    }

    /// Length of the trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restocks allowed inside one window.
    pub fn max_restocks(&self) -> i64 {
        self.max_restocks
    }

    /// Exclusive lower bound of the window ending at `now`.
    ///
    /// Restocks created strictly after this instant count toward the quota.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    /// Returns true once `count` restocks inside the window exhaust the quota.
    pub fn is_reached(&self, count: i64) -> bool {
        count >= self.max_restocks
    }
}

impl Default for RestockQuota {
    fn default() -> Self {
        RestockQuota::new(
            Duration::hours(RESTOCK_WINDOW_HOURS),
            MAX_RESTOCKS_PER_WINDOW,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_reached_threshold() {
        let quota = RestockQuota::default();
        for count in 0..3 {
            assert!(!quota.is_reached(count), "count {count} should be allowed");
        }
        assert!(quota.is_reached(3));
        assert!(quota.is_reached(4));
    }

    #[test]
    fn test_window_start_trails_now() {
        let quota = RestockQuota::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(quota.window_start(now), expected);
    }

    #[test]
    fn test_custom_quota() {
        let quota = RestockQuota::new(Duration::minutes(5), 1);
        assert_eq!(quota.max_restocks(), 1);
        assert_eq!(quota.window(), Duration::minutes(5));
        assert!(quota.is_reached(1));
    }
}
