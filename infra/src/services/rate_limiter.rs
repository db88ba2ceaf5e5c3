//! Redis-based fixed-window rate limiter

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use redis::Script;

use ext_core::domain::value_objects::RateLimitDecision;
use ext_core::errors::DomainResult;
use ext_core::services::RateLimiter;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Counts the request and starts the window on the first one.
/// Returns `{count, remaining_window_ms}`.
static COUNT_REQUEST: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        local count = redis.call('INCR', KEYS[1])
        local ttl = redis.call('PTTL', KEYS[1])
        if ttl < 0 then
            redis.call('PEXPIRE', KEYS[1], ARGV[1])
            ttl = tonumber(ARGV[1])
        end
        return {count, ttl}
        "#,
    )
});

/// Redis implementation of [`RateLimiter`]
///
/// Each key is a counter that expires with its window, so counting and
/// window rollover need no coordination between server instances.
pub struct RedisRateLimiter {
    client: RedisClient,
}

impl RedisRateLimiter {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &str, quota: u32, window: Duration) -> DomainResult<RateLimitDecision> {
        let redis_key = self.client.config().key(&["rate_limit", key]);
        let window_ms = window.as_millis().max(1) as u64;

        let mut conn = self.client.connection();
        let (count, ttl_ms): (u64, i64) = COUNT_REQUEST
            .key(redis_key)
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(InfrastructureError::from)?;

        let now = Utc::now();
        let reset_at = now + chrono::Duration::milliseconds(ttl_ms.max(0));
        Ok(RateLimitDecision::from_count(count, quota, reset_at, now))
    }
}
