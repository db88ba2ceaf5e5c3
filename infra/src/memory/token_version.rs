//! In-memory token version store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ext_core::domain::entities::token::INITIAL_TOKEN_VERSION;
use ext_core::errors::{DomainError, DomainResult};
use ext_core::repositories::TokenVersionRepository;

/// Token versions held in a map guarded by an async lock
///
/// Increments take the write lock, so concurrent revocations serialize.
#[derive(Default)]
pub struct InMemoryTokenVersionRepository {
    versions: RwLock<HashMap<String, i64>>,
}

impl InMemoryTokenVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with users at the initial version
    pub fn with_users<I, S>(user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let versions = user_ids
            .into_iter()
            .map(|id| (id.into(), INITIAL_TOKEN_VERSION))
            .collect();
        Self {
            versions: RwLock::new(versions),
        }
    }

    /// Make a user known; an existing user keeps their version
    pub async fn register_user(&self, user_id: &str) {
        self.versions
            .write()
            .await
            .entry(user_id.to_string())
            .or_insert(INITIAL_TOKEN_VERSION);
    }
}

#[async_trait]
impl TokenVersionRepository for InMemoryTokenVersionRepository {
    async fn current_version(&self, user_id: &str) -> DomainResult<Option<i64>> {
        Ok(self.versions.read().await.get(user_id).copied())
    }

    async fn increment_version(&self, user_id: &str) -> DomainResult<i64> {
        let mut versions = self.versions.write().await;
        let version = versions
            .get_mut(user_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("user {}", user_id),
            })?;
        *version += 1;
        Ok(*version)
    }
}
