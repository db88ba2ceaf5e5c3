//! Outcome of a fixed-window rate limit check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of counting one request against a quota
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDecision {
    /// Whether the request fits in the current window
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// When the current window ends
    pub reset_at: DateTime<Utc>,
    /// Seconds the client should wait; 0 when allowed
    pub retry_after_seconds: u64,
}

impl RateLimitDecision {
    /// Builds a decision from the request count after incrementing
    ///
    /// `count` includes the request being checked.
    pub fn from_count(count: u64, quota: u32, reset_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let allowed = count <= u64::from(quota);
        let remaining = u64::from(quota).saturating_sub(count) as u32;
        let retry_after_seconds = if allowed {
            0
        } else {
            let millis = (reset_at - now).num_milliseconds().max(0) as u64;
            // Round up so clients never retry inside the same window
            millis.div_ceil(1000).max(1)
        };

        Self {
            allowed,
            remaining,
            reset_at,
            retry_after_seconds,
        }
    }
}
