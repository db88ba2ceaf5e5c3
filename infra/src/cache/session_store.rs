//! Web-session lookup in Redis
//!
//! The web application stores each session as JSON under
//! `{key_prefix}:{session_id}`; this side only reads it.

use async_trait::async_trait;
use tracing::{debug, error};

use ext_core::domain::entities::SessionUser;
use ext_core::errors::DomainResult;
use ext_core::repositories::SessionRepository;
use ext_shared::config::SessionConfig;

use super::RedisClient;
use crate::InfrastructureError;

pub struct RedisSessionRepository {
    client: RedisClient,
    key_prefix: String,
}

impl RedisSessionRepository {
    pub fn new(client: RedisClient, config: &SessionConfig) -> Self {
        Self {
            client,
            key_prefix: config.key_prefix.clone(),
        }
    }

    fn key(&self, session_id: &str) -> String {
        format!("{}:{}", self.key_prefix, session_id)
    }
}

#[async_trait]
impl SessionRepository for RedisSessionRepository {
    async fn find_session_user(&self, session_id: &str) -> DomainResult<Option<SessionUser>> {
        let Some(payload) = self.client.get(&self.key(session_id)).await? else {
            debug!("No web session for presented cookie");
            return Ok(None);
        };

        let user = serde_json::from_str::<SessionUser>(&payload).map_err(|e| {
            error!(error = %e, "Stored web session is not valid JSON");
            InfrastructureError::from(e)
        })?;
        Ok(Some(user))
    }
}
