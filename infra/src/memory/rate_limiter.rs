//! In-memory fixed-window rate limiter

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use ext_core::domain::value_objects::RateLimitDecision;
use ext_core::errors::DomainResult;
use ext_core::services::RateLimiter;

/// Expired windows are dropped once every this many checks
const PRUNE_INTERVAL: u64 = 256;

struct Window {
    ends: Instant,
    count: u64,
}

#[derive(Default)]
struct Counters {
    windows: HashMap<String, Window>,
    checks: u64,
}

impl Counters {
    fn prune_expired(&mut self, now: Instant) {
        self.windows.retain(|_, w| w.ends > now);
    }
}

/// Per-key counters; a window opens on the first request and closes
/// `window` later
#[derive(Default)]
pub struct InMemoryRateLimiter {
    counters: Mutex<Counters>,
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str, quota: u32, window: Duration) -> DomainResult<RateLimitDecision> {
        let now = Instant::now();
        let (count, remaining_window) = {
            let mut counters = self.counters.lock().await;
            counters.checks += 1;
            if counters.checks % PRUNE_INTERVAL == 0 {
                counters.prune_expired(now);
            }

            let entry = counters.windows.entry(key.to_string()).or_insert(Window {
                ends: now + window,
                count: 0,
            });
            if entry.ends <= now {
                entry.ends = now + window;
                entry.count = 0;
            }
            entry.count += 1;
            (entry.count, entry.ends.saturating_duration_since(now))
        };

        let wall_now = Utc::now();
        let reset_at = wall_now
            + chrono::Duration::from_std(remaining_window).unwrap_or_else(|_| chrono::Duration::zero());
        Ok(RateLimitDecision::from_count(count, quota, reset_at, wall_now))
    }
}
