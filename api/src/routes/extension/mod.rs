//! Extension token endpoints
//!
//! - `POST /extension/token` mints a token for the signed-in web user
//! - `GET /extension/validate` checks a bearer token
//! - `POST /extension/refresh` exchanges a token that is about to expire
//! - `POST /extension/revoke` invalidates every token of the caller

pub mod issue;
pub mod refresh;
pub mod revoke;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use actix_web::web;
use ext_core::repositories::SessionRepository;
use ext_core::services::ExtensionAuthService;

use crate::middleware::ExtensionTokenAuth;

/// Shared state for the extension endpoints
pub struct AppState {
    pub auth_service: Arc<ExtensionAuthService>,
    pub sessions: Arc<dyn SessionRepository>,
    /// Name of the web-session cookie read by issuance
    pub session_cookie: String,
}

impl AppState {
    pub fn new(
        auth_service: Arc<ExtensionAuthService>,
        sessions: Arc<dyn SessionRepository>,
        session_cookie: impl Into<String>,
    ) -> Self {
        Self {
            auth_service,
            sessions,
            session_cookie: session_cookie.into(),
        }
    }
}

/// Register the extension routes under the current scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/extension")
            .route("/token", web::post().to(issue::issue_token))
            .route("/validate", web::get().to(validate::validate_token))
            .route("/refresh", web::post().to(refresh::refresh_token))
            .service(
                web::resource("/revoke")
                    .wrap(ExtensionTokenAuth::new())
                    .route(web::post().to(revoke::revoke_tokens)),
            ),
    );
}
