//! Integration tests for the extension token endpoints

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::{
    cookie::Cookie,
    http::{header, StatusCode},
    test, web,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};

use ext_api::app::{build_auth_service, create_app};
use ext_api::middleware::create_cors;
use ext_api::routes::extension::AppState;
use ext_core::domain::entities::{Identity, IssuedToken, SessionUser, VerifiedToken};
use ext_core::errors::{DomainError, DomainResult, TokenError};
use ext_core::repositories::TokenVersionRepository;
use ext_core::services::{
    ExtensionAuthConfig, ExtensionAuthService, JwtTokenSigner, JwtTokenVerifier, RefreshPolicy,
    TokenServiceConfig, TokenSigner, TokenVerifier,
};
use ext_infra::memory::{
    InMemoryRateLimiter, InMemorySessionRepository, InMemoryTokenVersionRepository,
};
use ext_shared::config::{CorsConfig, EndpointLimit, Environment, JwtConfig, RateLimitConfig};

const SECRET: &str = "extension-routes-test-secret";
const SESSION_COOKIE: &str = "renoveasy_session";

struct Fixture {
    state: web::Data<AppState>,
    versions: Arc<InMemoryTokenVersionRepository>,
}

async fn sessions() -> Arc<InMemorySessionRepository> {
    let sessions = Arc::new(InMemorySessionRepository::new());
    sessions
        .insert(
            "sess-ok",
            SessionUser::new("user-123", Some("test@example.com"), Some("Test User")),
        )
        .await;
    sessions
        .insert("sess-no-email", SessionUser::new("user-456", None, Some("No Mail")))
        .await;
    sessions
}

async fn fixture_with_limits(rate_limit: RateLimitConfig) -> Fixture {
    let versions = Arc::new(InMemoryTokenVersionRepository::with_users([
        "user-123", "user-456",
    ]));
    let service = build_auth_service(
        &JwtConfig::new(SECRET),
        &rate_limit,
        versions.clone(),
        Arc::new(InMemoryRateLimiter::new()),
    );
    let state = web::Data::new(AppState::new(
        Arc::new(service),
        sessions().await,
        SESSION_COOKIE,
    ));
    Fixture { state, versions }
}

async fn fixture() -> Fixture {
    fixture_with_limits(RateLimitConfig::default()).await
}

fn dev_cors() -> actix_cors::Cors {
    create_cors(&CorsConfig::default(), Environment::Development)
}

/// Token for user-123 that expires `remaining` from now
fn token_expiring_in(remaining: Duration) -> String {
    let config = TokenServiceConfig::from(&JwtConfig::new(SECRET));
    let signer = JwtTokenSigner::new(config);
    let lifetime = signer.token_lifetime();
    signer
        .issue_at(
            &Identity::new("user-123", "test@example.com"),
            0,
            lifetime,
            Utc::now() - lifetime + remaining,
        )
        .unwrap()
        .token
}

struct CountingFailingSigner {
    calls: AtomicUsize,
}

impl TokenSigner for CountingFailingSigner {
    fn issue(&self, _identity: &Identity, _token_version: i64) -> DomainResult<IssuedToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::Token(TokenError::SigningFailed))
    }
}

struct BrokenVerifier;

#[async_trait]
impl TokenVerifier for BrokenVerifier {
    async fn verify(&self, _token: &str) -> DomainResult<Option<VerifiedToken>> {
        Err(DomainError::Internal {
            message: "key store offline".to_string(),
        })
    }
}

async fn state_with(
    signer: Arc<dyn TokenSigner>,
    verifier: Option<Arc<dyn TokenVerifier>>,
) -> web::Data<AppState> {
    let config = TokenServiceConfig::from(&JwtConfig::new(SECRET));
    let versions: Arc<dyn TokenVersionRepository> = Arc::new(
        InMemoryTokenVersionRepository::with_users(["user-123", "user-456"]),
    );
    let verifier: Arc<dyn TokenVerifier> = match verifier {
        Some(verifier) => verifier,
        None => Arc::new(JwtTokenVerifier::new(versions.clone(), &config)),
    };
    let service = ExtensionAuthService::new(
        signer,
        verifier,
        versions,
        Arc::new(InMemoryRateLimiter::new()),
        RefreshPolicy::default(),
        ExtensionAuthConfig::default(),
    );
    web::Data::new(AppState::new(Arc::new(service), sessions().await, SESSION_COOKIE))
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let f = fixture().await;
    let app = test::init_service(create_app(f.state.clone(), dev_cors())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_issue_then_validate() {
    let f = fixture().await;
    let app = test::init_service(create_app(f.state.clone(), dev_cors())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/extension/token")
        .cookie(Cookie::new(SESSION_COOKIE, "sess-ok"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let issued: serde_json::Value = test::read_body_json(resp).await;
    let token = issued["token"].as_str().unwrap().to_string();
    assert_eq!(issued["user"]["name"], "Test User");

    let req = test::TestRequest::get()
        .uri("/api/v1/extension/validate")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["userId"], "user-123");
    assert_eq!(body["email"], "test@example.com");
    assert_eq!(body["expiresAt"], issued["expiresAt"]);
}

#[actix_web::test]
async fn test_validate_header_errors_are_distinct() {
    let f = fixture().await;
    let app = test::init_service(create_app(f.state.clone(), dev_cors())).await;

    let cases: [(Option<&str>, &str); 4] = [
        (None, "Missing or invalid Authorization header"),
        (Some("token-without-bearer-prefix"), "Missing or invalid Authorization header"),
        (Some("Bearer "), "Missing token"),
        (Some("Bearer garbage"), "Invalid or expired token"),
    ];

    for (header_value, expected) in cases {
        let mut req = test::TestRequest::get().uri("/api/v1/extension/validate");
        if let Some(value) = header_value {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {:?}", header_value);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], expected, "header {:?}", header_value);
    }
}

#[actix_web::test]
async fn test_validate_verifier_failure_is_500() {
    let signer = Arc::new(JwtTokenSigner::new(TokenServiceConfig::from(&JwtConfig::new(SECRET))));
    let state = state_with(signer, Some(Arc::new(BrokenVerifier))).await;
    let app = test::init_service(create_app(state, dev_cors())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/extension/validate")
        .insert_header((header::AUTHORIZATION, "Bearer anything"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Token validation failed");
}

#[actix_web::test]
async fn test_issue_rejections_never_reach_signer() {
    let signer = Arc::new(CountingFailingSigner {
        calls: AtomicUsize::new(0),
    });
    let state = state_with(signer.clone(), None).await;
    let app = test::init_service(create_app(state, dev_cors())).await;

    // No session
    let req = test::TestRequest::post()
        .uri("/api/v1/extension/token")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Unknown session
    let req = test::TestRequest::post()
        .uri("/api/v1/extension/token")
        .cookie(Cookie::new(SESSION_COOKIE, "sess-expired"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Session without email
    let req = test::TestRequest::post()
        .uri("/api/v1/extension/token")
        .cookie(Cookie::new(SESSION_COOKIE, "sess-no-email"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "User email is required");

    assert_eq!(signer.calls.load(Ordering::SeqCst), 0);

    // Signing failure
    let req = test::TestRequest::post()
        .uri("/api/v1/extension/token")
        .cookie(Cookie::new(SESSION_COOKIE, "sess-ok"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to generate extension token");
    assert_eq!(signer.calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_early_refresh_is_idempotent_until_rate_limited() {
    let f = fixture_with_limits(RateLimitConfig {
        enabled: true,
        refresh: EndpointLimit::new(3, 60),
        ..Default::default()
    })
    .await;
    let app = test::init_service(create_app(f.state.clone(), dev_cors())).await;
    let token = token_expiring_in(Duration::days(20));

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/extension/refresh")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["token"], token.as_str());
        assert!(body["message"].is_string());
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/extension/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key(header::RETRY_AFTER));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Too many requests");
}

#[actix_web::test]
async fn test_refresh_in_window_mints_new_token() {
    let f = fixture().await;
    let app = test::init_service(create_app(f.state.clone(), dev_cors())).await;
    let old = token_expiring_in(Duration::days(2));

    let req = test::TestRequest::post()
        .uri("/api/v1/extension/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", old)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;

    let new = body["token"].as_str().unwrap();
    assert_ne!(new, old);
    assert!(body.get("message").is_none());

    // The old token keeps working until it expires
    let req = test::TestRequest::get()
        .uri("/api/v1/extension/validate")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", old)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_reads_body_when_header_missing() {
    let f = fixture().await;
    let app = test::init_service(create_app(f.state.clone(), dev_cors())).await;
    let token = token_expiring_in(Duration::days(1));

    let req = test::TestRequest::post()
        .uri("/api/v1/extension/refresh")
        .set_json(serde_json::json!({ "token": token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/extension/refresh")
        .set_json(serde_json::json!({ "token": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_revoke_invalidates_all_tokens() {
    let f = fixture().await;
    let app = test::init_service(create_app(f.state.clone(), dev_cors())).await;
    let first = token_expiring_in(Duration::days(10));
    let second = token_expiring_in(Duration::days(2));

    let req = test::TestRequest::post()
        .uri("/api/v1/extension/revoke")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/extension/revoke")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", first)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(f.versions.current_version("user-123").await.unwrap(), Some(1));

    for token in [&first, &second] {
        let req = test::TestRequest::get()
            .uri("/api/v1/extension/validate")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    // A revoked token cannot be refreshed either
    let req = test::TestRequest::post()
        .uri("/api/v1/extension/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", second)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_production_cors_admits_extension_origins() {
    let f = fixture().await;
    let cors = create_cors(&CorsConfig::default(), Environment::Production);
    let app = test::init_service(create_app(f.state.clone(), cors)).await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/v1/extension/validate")
        .insert_header((header::ORIGIN, "chrome-extension://abcdefghijklmnop"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "chrome-extension://abcdefghijklmnop"
    );

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/v1/extension/validate")
        .insert_header((header::ORIGIN, "https://evil.example.com"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    if let Ok(resp) = resp {
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
