//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// A fixed-window quota for one action
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointLimit {
    /// Maximum requests allowed per window
    pub max_requests: u32,

    /// Window size in seconds
    pub window_seconds: u64,
}

impl EndpointLimit {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window_seconds,
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Per-user limit on minting tokens from a web session
    pub issue: EndpointLimit,

    /// Per-user limit on refresh calls
    pub refresh: EndpointLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            issue: EndpointLimit::new(10, 3600),
            refresh: EndpointLimit::new(20, 60),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            issue: EndpointLimit::new(
                env_or("RATE_LIMIT_ISSUE_PER_HOUR", defaults.issue.max_requests),
                defaults.issue.window_seconds,
            ),
            refresh: EndpointLimit::new(
                env_or("RATE_LIMIT_REFRESH_PER_MINUTE", defaults.refresh.max_requests),
                defaults.refresh.window_seconds,
            ),
        }
    }
}

fn default_enabled() -> bool {
    true
}
