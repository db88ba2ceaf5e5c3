//! Token version repository trait.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Per-user revocation counter
///
/// The counter is the only mutable state the token service depends on. A
/// token is valid only while its embedded version equals the stored one.
///
/// # Concurrency
/// `increment_version` must be atomic at the storage layer. Implementations
/// never read the value, add one, and write it back from application code.
#[async_trait]
pub trait TokenVersionRepository: Send + Sync {
    /// Current version for a user
    ///
    /// # Returns
    /// * `Ok(Some(version))` - User exists
    /// * `Ok(None)` - No such user
    /// * `Err(DomainError)` - Storage unreachable
    async fn current_version(&self, user_id: &str) -> DomainResult<Option<i64>>;

    /// Atomically add one to a user's version
    ///
    /// # Returns
    /// * `Ok(version)` - The version after the increment
    /// * `Err(DomainError::NotFound)` - No such user
    /// * `Err(DomainError)` - Storage unreachable
    async fn increment_version(&self, user_id: &str) -> DomainResult<i64>;
}
