//! Global revocation.

use std::sync::Arc;

use tracing::{error, info};

use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenVersionRepository;

/// Invalidates every token a user holds by bumping their token version
///
/// When the repository is a [`super::CachedTokenVersionRepository`], the cache
/// is updated before `revoke` returns, so the next verification already sees
/// the new version.
#[derive(Clone)]
pub struct RevocationService {
    versions: Arc<dyn TokenVersionRepository>,
}

impl RevocationService {
    pub fn new(versions: Arc<dyn TokenVersionRepository>) -> Self {
        Self { versions }
    }

    /// Revoke all tokens issued to `user_id` so far
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No such user
    /// * `Err(TokenError::RevocationFailed)` - Storage failed; the version may not have moved
    pub async fn revoke(&self, user_id: &str) -> DomainResult<()> {
        let version = self
            .versions
            .increment_version(user_id)
            .await
            .map_err(|e| {
                error!(user_id, error = %e, "Failed to revoke extension tokens");
                match e {
                    DomainError::NotFound { .. }
                    | DomainError::Token(TokenError::RevocationFailed { .. }) => e,
                    other => DomainError::Token(TokenError::RevocationFailed {
                        message: other.to_string(),
                    }),
                }
            })?;

        info!(user_id, token_version = version, "Revoked all extension tokens for user");
        Ok(())
    }
}
