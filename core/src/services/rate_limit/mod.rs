//! Rate limiting interface consumed by the token endpoints

use std::time::Duration;

use async_trait::async_trait;
use ext_shared::config::EndpointLimit;

use crate::domain::value_objects::RateLimitDecision;
use crate::errors::DomainResult;

/// Fixed-window quota counter keyed by an arbitrary string
///
/// `check` counts the request and reports whether it fits, as one atomic
/// step, so concurrent callers never double-count or under-count.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn check(&self, key: &str, quota: u32, window: Duration) -> DomainResult<RateLimitDecision>;
}

/// Quota for one action, applied per user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitRule {
    pub action: &'static str,
    pub quota: u32,
    pub window: Duration,
}

impl RateLimitRule {
    pub fn new(action: &'static str, quota: u32, window: Duration) -> Self {
        Self {
            action,
            quota,
            window,
        }
    }

    pub fn from_limit(action: &'static str, limit: &EndpointLimit) -> Self {
        Self::new(
            action,
            limit.max_requests,
            Duration::from_secs(limit.window_seconds),
        )
    }

    /// Counter key for this action and user
    pub fn key_for(&self, user_id: &str) -> String {
        format!("{}:{}", self.action, user_id)
    }
}
