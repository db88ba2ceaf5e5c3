//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing and web-session cookie configuration
//! - `cache` - Redis configuration and version cache TTL
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - Per-user quotas for token issuance and refresh
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, SessionConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use rate_limit::{EndpointLimit, RateLimitConfig};
pub use server::{CorsConfig, ServerConfig};

/// Where token versions, sessions and rate-limit counters live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MySQL for token versions, Redis for sessions, counters and caching
    Mysql,
    /// Process-local maps; single-instance development only
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Mysql
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "redis" => Ok(StorageBackend::Mysql),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

impl StorageBackend {
    /// Read `STORAGE_BACKEND`, defaulting to MySQL/Redis
    pub fn from_env() -> Self {
        std::env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Storage backend selection
    #[serde(default)]
    pub storage: StorageBackend,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
            storage: StorageBackend::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, reading `.env` first
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
            storage: StorageBackend::from_env(),
        }
    }

    /// Reject settings that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.auth.jwt.token_lifetime_days <= 0 {
            return Err("Extension token lifetime must be positive".to_string());
        }
        if self.auth.jwt.refresh_window_days < 0
            || self.auth.jwt.refresh_window_days > self.auth.jwt.token_lifetime_days
        {
            return Err("Refresh window must lie within the token lifetime".to_string());
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
