//! Application factory
//!
//! Builds the token service from configuration and assembles the
//! Actix-web application around it.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, HttpResponse,
};
use ext_core::repositories::TokenVersionRepository;
use ext_core::services::{
    ExtensionAuthConfig, ExtensionAuthService, JwtTokenSigner, JwtTokenVerifier, RateLimiter,
    RefreshPolicy, TokenServiceConfig,
};
use ext_shared::config::{JwtConfig, RateLimitConfig};

use crate::dto::ErrorResponse;
use crate::routes::extension::{self, AppState};

/// Wire signer, verifier, refresh policy and rate limits into one service
pub fn build_auth_service(
    jwt: &JwtConfig,
    rate_limit: &RateLimitConfig,
    versions: Arc<dyn TokenVersionRepository>,
    rate_limiter: Arc<dyn RateLimiter>,
) -> ExtensionAuthService {
    let token_config = TokenServiceConfig::from(jwt);
    let policy = RefreshPolicy::new(token_config.refresh_window);

    ExtensionAuthService::new(
        Arc::new(JwtTokenSigner::new(token_config.clone())),
        Arc::new(JwtTokenVerifier::new(versions.clone(), &token_config)),
        versions,
        rate_limiter,
        policy,
        ExtensionAuthConfig::from(rate_limit),
    )
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(extension::configure))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "extension-token-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not found"))
}
