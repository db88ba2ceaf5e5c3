//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Prefix applied to every key this service writes
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// TTL of cached token versions in seconds (0 disables the cache)
    #[serde(default = "default_version_ttl")]
    pub token_version_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            key_prefix: default_key_prefix(),
            token_version_ttl: default_version_ttl(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: env_or("REDIS_CONNECTION_TIMEOUT", defaults.connection_timeout),
            key_prefix: std::env::var("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            token_version_ttl: env_or("TOKEN_VERSION_CACHE_TTL", defaults.token_version_ttl),
        }
    }

    /// Whether token versions should be cached at all
    pub fn version_cache_enabled(&self) -> bool {
        self.token_version_ttl > 0
    }

    /// Build a namespaced key
    pub fn key(&self, parts: &[&str]) -> String {
        let mut key = self.key_prefix.clone();
        for part in parts {
            key.push(':');
            key.push_str(part);
        }
        key
    }
}

fn default_key_prefix() -> String {
    String::from("ext")
}

fn default_version_ttl() -> u64 {
    60
}
