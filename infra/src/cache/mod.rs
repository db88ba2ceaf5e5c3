//! Cache module for Redis-based storage
//!
//! Provides the Redis connection with retry logic, the token version cache
//! and the web-session lookup.

pub mod redis_client;
pub mod session_store;
pub mod version_cache;

pub use redis_client::RedisClient;
pub use session_store::RedisSessionRepository;
pub use version_cache::RedisTokenVersionCache;

// Re-export commonly used types
pub use ext_shared::config::CacheConfig;
