//! Read-through cache in front of the token version repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenVersionRepository;

/// Short-lived copy of users' token versions
///
/// Versions only grow, so `store_if_newer` never lowers a cached value. That
/// keeps a slow reader from writing back a version older than the one a
/// concurrent revocation just stored.
#[async_trait]
pub trait TokenVersionCache: Send + Sync {
    async fn get(&self, user_id: &str) -> DomainResult<Option<i64>>;

    async fn store_if_newer(&self, user_id: &str, version: i64) -> DomainResult<()>;

    /// Replace the entry with a tombstone for the cache TTL
    ///
    /// `get` reports a tombstone as a miss and `store_if_newer` leaves it in
    /// place, so a reader holding a pre-revocation version cannot repopulate
    /// the entry.
    async fn invalidate(&self, user_id: &str) -> DomainResult<()>;
}

/// [`TokenVersionRepository`] decorator that consults a cache first
///
/// Increments go to the inner repository and then synchronously to the
/// cache. Cache read errors fall back to the repository.
pub struct CachedTokenVersionRepository {
    inner: Arc<dyn TokenVersionRepository>,
    cache: Arc<dyn TokenVersionCache>,
}

impl CachedTokenVersionRepository {
    pub fn new(inner: Arc<dyn TokenVersionRepository>, cache: Arc<dyn TokenVersionCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl TokenVersionRepository for CachedTokenVersionRepository {
    async fn current_version(&self, user_id: &str) -> DomainResult<Option<i64>> {
        match self.cache.get(user_id).await {
            Ok(Some(version)) => return Ok(Some(version)),
            Ok(None) => {}
            Err(e) => warn!(user_id, error = %e, "Token version cache read failed"),
        }

        let version = self.inner.current_version(user_id).await?;
        if let Some(version) = version {
            if let Err(e) = self.cache.store_if_newer(user_id, version).await {
                warn!(user_id, error = %e, "Token version cache write failed");
            }
        }
        Ok(version)
    }

    async fn increment_version(&self, user_id: &str) -> DomainResult<i64> {
        let version = self.inner.increment_version(user_id).await?;

        if let Err(store_err) = self.cache.store_if_newer(user_id, version).await {
            warn!(user_id, error = %store_err, "Failed to cache new token version, invalidating");
            if let Err(e) = self.cache.invalidate(user_id).await {
                error!(user_id, error = %e, "Token version cache holds a stale entry");
                return Err(DomainError::Token(TokenError::RevocationFailed {
                    message: format!("cache not updated: {}", e),
                }));
            }
        }

        Ok(version)
    }
}
