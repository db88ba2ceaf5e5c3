//! Redis-backed token version cache

use async_trait::async_trait;
use once_cell::sync::Lazy;
use redis::Script;
use tracing::debug;

use ext_core::errors::DomainResult;
use ext_core::services::TokenVersionCache;

use super::RedisClient;
use crate::InfrastructureError;

/// Value left behind by `invalidate`
const TOMBSTONE: &str = "invalidated";

/// Writes ARGV[1] unless the key holds a tombstone (ARGV[3]) or a version
/// that is already at least as new. Returns 1 when the value was written.
static STORE_IF_NEWER: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        local current = redis.call('GET', KEYS[1])
        if current == ARGV[3] then
            return 0
        end
        if current and tonumber(current) >= tonumber(ARGV[1]) then
            return 0
        end
        redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[2])
        return 1
        "#,
    )
});

/// Token versions cached under `{prefix}:token_version:{user_id}`
pub struct RedisTokenVersionCache {
    client: RedisClient,
    ttl_seconds: u64,
}

impl RedisTokenVersionCache {
    pub fn new(client: RedisClient) -> Self {
        let ttl_seconds = client.config().token_version_ttl.max(1);
        Self {
            client,
            ttl_seconds,
        }
    }

    fn key(&self, user_id: &str) -> String {
        self.client.config().key(&["token_version", user_id])
    }
}

#[async_trait]
impl TokenVersionCache for RedisTokenVersionCache {
    async fn get(&self, user_id: &str) -> DomainResult<Option<i64>> {
        let value = self.client.get(&self.key(user_id)).await?;
        // A tombstone does not parse and reads as a miss
        Ok(value.and_then(|v| v.parse().ok()))
    }

    async fn store_if_newer(&self, user_id: &str, version: i64) -> DomainResult<()> {
        let mut conn = self.client.connection();
        let written: i64 = STORE_IF_NEWER
            .key(self.key(user_id))
            .arg(version)
            .arg(self.ttl_seconds)
            .arg(TOMBSTONE)
            .invoke_async(&mut conn)
            .await
            .map_err(InfrastructureError::from)?;

        if written == 0 {
            debug!(user_id, version, "Cached token version already current");
        }
        Ok(())
    }

    async fn invalidate(&self, user_id: &str) -> DomainResult<()> {
        self.client
            .set_with_expiry(&self.key(user_id), TOMBSTONE, self.ttl_seconds)
            .await?;
        Ok(())
    }
}
