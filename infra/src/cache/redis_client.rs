//! Redis cache client implementation
//!
//! A Redis client with retry logic and the handful of plain key operations
//! the service needs. Atomic multi-step updates go through Lua scripts on
//! [`RedisClient::connection`].

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Redis cache client with retry logic
///
/// Cloning is cheap; every clone shares the same multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of retry attempts for operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use ext_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::default()).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of retry attempts
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout),
            max_retries,
            retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
                .await
                .unwrap_or_else(|_| {
                    Err(RedisError::from((
                        redis::ErrorKind::IoError,
                        "connection timed out",
                    )))
                });

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// A handle on the shared connection for scripts and pipelines
    pub fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Get a value from cache
    ///
    /// # Returns
    /// * `Result<Option<String>, InfrastructureError>` - Cached value or None if not found
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to get key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Set a value with expiration time
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);

        self.execute_with_retry(|mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                InfrastructureError::Cache(e)
            })?;

        Ok(response == "PONG")
    }

    /// Execute a Redis operation with automatic retry logic
    ///
    /// Only idempotent operations go through here; scripts that increment
    /// counters run once on [`Self::connection`].
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether an error is transient and the operation may be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        let proto = &url[..proto_end + 3];
        let host_part = &url[at_pos..];
        return format!("{}****{}", proto, host_part);
    }
    url.to_string()
}
