//! Shared configuration for the extension token service
//!
//! This crate provides the configuration types used across all server modules:
//! - Environment detection and logging
//! - HTTP server and CORS settings
//! - Database and Redis connection settings
//! - Token signing, session cookie and rate limit settings

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, EndpointLimit, Environment,
    JwtConfig, LoggingConfig, RateLimitConfig, ServerConfig, SessionConfig, StorageBackend,
};
