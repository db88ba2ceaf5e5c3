//! Configuration for the token service

use chrono::Duration;
use ext_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::domain::entities::token::DEFAULT_TOKEN_LIFETIME_DAYS;

use super::refresh_policy::REFRESH_WINDOW_DAYS;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Issuer claim written and required
    pub issuer: String,
    /// Audience claim written and required
    pub audience: String,
    /// Lifetime of every minted token
    pub token_lifetime: Duration,
    /// Trailing period before expiry in which refresh mints a new token
    pub refresh_window: Duration,
    /// Upper bound on the version lookup during verification
    pub version_lookup_timeout: std::time::Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: "renoveasy".to_string(),
            audience: "renoveasy-extension".to_string(),
            token_lifetime: Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS),
            refresh_window: Duration::days(REFRESH_WINDOW_DAYS),
            version_lookup_timeout: std::time::Duration::from_secs(2),
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            token_lifetime: Duration::days(config.token_lifetime_days),
            refresh_window: Duration::days(config.refresh_window_days),
            version_lookup_timeout: std::time::Duration::from_millis(
                config.version_lookup_timeout_ms,
            ),
        }
    }
}
