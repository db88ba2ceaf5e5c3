//! Token signing and web-session configuration

use serde::{Deserialize, Serialize};

use super::env_or;

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// Extension token signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,

    /// Token lifetime in days, fixed at mint time
    pub token_lifetime_days: i64,

    /// Trailing period before expiry during which refresh mints a new token
    pub refresh_window_days: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Upper bound on the stored-version lookup during verification, in milliseconds
    #[serde(default = "default_lookup_timeout_ms")]
    pub version_lookup_timeout_ms: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            token_lifetime_days: 30,
            refresh_window_days: 3,
            issuer: String::from("renoveasy"),
            audience: String::from("renoveasy-extension"),
            version_lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

impl JwtConfig {
    /// Create a new configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in days
    pub fn with_lifetime_days(mut self, days: i64) -> Self {
        self.token_lifetime_days = days;
        self
    }

    /// Set refresh window in days
    pub fn with_refresh_window_days(mut self, days: i64) -> Self {
        self.refresh_window_days = days;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Web session cookie configuration
///
/// The web session itself is owned by the web application; this service only
/// reads the cookie to find the signed-in user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session cookie name
    pub cookie_name: String,

    /// Key prefix for session records in Redis
    #[serde(default = "default_session_prefix")]
    pub key_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("renoveasy_session"),
            key_prefix: default_session_prefix(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token configuration
    pub jwt: JwtConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let session_defaults = SessionConfig::default();

        Self {
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
                token_lifetime_days: env_or(
                    "EXTENSION_TOKEN_LIFETIME_DAYS",
                    defaults.token_lifetime_days,
                ),
                refresh_window_days: env_or(
                    "EXTENSION_REFRESH_WINDOW_DAYS",
                    defaults.refresh_window_days,
                ),
                issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
                audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
                version_lookup_timeout_ms: env_or(
                    "TOKEN_VERSION_LOOKUP_TIMEOUT_MS",
                    defaults.version_lookup_timeout_ms,
                ),
            },
            session: SessionConfig {
                cookie_name: std::env::var("SESSION_COOKIE_NAME")
                    .unwrap_or(session_defaults.cookie_name),
                key_prefix: std::env::var("SESSION_KEY_PREFIX")
                    .unwrap_or(session_defaults.key_prefix),
            },
        }
    }
}

fn default_lookup_timeout_ms() -> u64 {
    2000
}

fn default_session_prefix() -> String {
    String::from("session")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.token_lifetime_days, 30);
        assert_eq!(config.refresh_window_days, 3);
        assert_eq!(config.version_lookup_timeout_ms, 2000);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_lifetime_days(14)
            .with_refresh_window_days(2);

        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.token_lifetime_days, 14);
        assert_eq!(config.refresh_window_days, 2);
        assert!(!config.is_using_default_secret());
    }
}
