//! # Infrastructure Layer
//!
//! Concrete collaborators for the extension token service: the per-user
//! token version store, the version cache, the rate limiter and the web
//! session lookup.
//!
//! ## Features
//!
//! - `mysql`: MySQL token version repository using SQLx (default)
//! - `redis-cache`: Redis version cache, rate limiter and session store (default)
//!
//! The [`memory`] module is always available and backs the test suite and
//! single-process deployments.

use ext_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client, version cache and session store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Services module - Redis-backed rate limiting
#[cfg(feature = "redis-cache")]
pub mod services;

/// In-process implementations of every collaborator
pub mod memory;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored payload could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
