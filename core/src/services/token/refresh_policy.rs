//! Refresh eligibility.

use chrono::{DateTime, Duration, Utc};

/// Length of the trailing refresh band before expiry
pub const REFRESH_WINDOW_DAYS: i64 = 3;

/// Decides whether a token may be exchanged for a new one
///
/// Depends only on the token's expiry and the current time. Both window ends
/// are inclusive. An expired token is never refreshable; the client must go
/// back through issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    window: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(Duration::days(REFRESH_WINDOW_DAYS))
    }
}

impl RefreshPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// `now <= expires_at <= now + window`, with `now` read once
    pub fn is_in_refresh_window(&self, expires_at: DateTime<Utc>) -> bool {
        self.is_in_refresh_window_at(expires_at, Utc::now())
    }

    pub fn is_in_refresh_window_at(&self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now <= expires_at && expires_at <= now + self.window
    }
}

/// Refresh check with the default three-day window
pub fn is_in_refresh_window(expires_at: DateTime<Utc>) -> bool {
    RefreshPolicy::default().is_in_refresh_window(expires_at)
}
