//! In-memory web sessions

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ext_core::domain::entities::SessionUser;
use ext_core::errors::DomainResult;
use ext_core::repositories::SessionRepository;

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionUser>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session_id: impl Into<String>, user: SessionUser) {
        self.sessions.write().await.insert(session_id.into(), user);
    }

    pub async fn remove(&self, session_id: &str) -> Option<SessionUser> {
        self.sessions.write().await.remove(session_id)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_session_user(&self, session_id: &str) -> DomainResult<Option<SessionUser>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }
}
