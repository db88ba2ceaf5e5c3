//! Shared fixtures for handler tests

use std::sync::Arc;

use actix_web::web;
use ext_core::domain::entities::SessionUser;
use ext_core::services::{
    ExtensionAuthConfig, ExtensionAuthService, JwtTokenSigner, JwtTokenVerifier, RefreshPolicy,
    TokenServiceConfig,
};
use ext_infra::memory::{
    InMemoryRateLimiter, InMemorySessionRepository, InMemoryTokenVersionRepository,
};

use super::AppState;

pub(crate) fn session_user() -> SessionUser {
    SessionUser::new("user-123", Some("test@example.com"), Some("Test User"))
}

pub(crate) struct TestContext {
    pub state: web::Data<AppState>,
    pub sessions: Arc<InMemorySessionRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        let config = TokenServiceConfig {
            jwt_secret: "handler-test-secret".to_string(),
            ..Default::default()
        };
        let versions = Arc::new(InMemoryTokenVersionRepository::with_users(["user-123"]));
        let sessions = Arc::new(InMemorySessionRepository::new());

        let service = ExtensionAuthService::new(
            Arc::new(JwtTokenSigner::new(config.clone())),
            Arc::new(JwtTokenVerifier::new(versions.clone(), &config)),
            versions,
            Arc::new(InMemoryRateLimiter::new()),
            RefreshPolicy::default(),
            ExtensionAuthConfig::default(),
        );

        let state = web::Data::new(AppState::new(
            Arc::new(service),
            sessions.clone(),
            "renoveasy_session",
        ));
        Self { state, sessions }
    }

    /// Issue a token for [`session_user`] directly through the service
    pub async fn issue(&self) -> String {
        self.state
            .auth_service
            .issue_token(&session_user())
            .await
            .unwrap()
            .token
    }
}
