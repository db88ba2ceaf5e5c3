//! Web session lookup trait.

use async_trait::async_trait;

use crate::domain::entities::SessionUser;
use crate::errors::DomainResult;

/// Read-only view of the web application's sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find the user signed in under `session_id`
    ///
    /// # Returns
    /// * `Ok(Some(user))` - Session is live
    /// * `Ok(None)` - Unknown or expired session
    /// * `Err(DomainError)` - Session store unreachable
    async fn find_session_user(&self, session_id: &str) -> DomainResult<Option<SessionUser>>;
}
