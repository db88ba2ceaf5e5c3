//! Token minting.

use chrono::{DateTime, Duration, Timelike, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use tracing::{debug, error};

use crate::domain::entities::{ExtensionClaims, Identity, IssuedToken};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Mints signed extension tokens
///
/// Signing has no storage side effects; minting N tokens costs no storage.
pub trait TokenSigner: Send + Sync {
    /// Mint a token for `identity` carrying `token_version`
    ///
    /// # Returns
    /// * `Ok(IssuedToken)` - Fully signed token with its expiry
    /// * `Err(TokenError::SigningFailed)` - Nothing usable was produced
    fn issue(&self, identity: &Identity, token_version: i64) -> DomainResult<IssuedToken>;
}

/// HMAC-signed JWT implementation of [`TokenSigner`]
pub struct JwtTokenSigner {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
}

impl JwtTokenSigner {
    /// Creates a signer; the key is derived once from the configured secret
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        Self {
            config,
            encoding_key,
        }
    }

    pub fn token_lifetime(&self) -> Duration {
        self.config.token_lifetime
    }

    /// Mint a token as of `now` with an explicit lifetime
    pub fn issue_at(
        &self,
        identity: &Identity,
        token_version: i64,
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> DomainResult<IssuedToken> {
        // JWT time claims carry whole seconds
        let issued_at = now
            .with_nanosecond(0)
            .ok_or(DomainError::Token(TokenError::SigningFailed))?;

        let claims = ExtensionClaims::new(
            identity,
            token_version,
            issued_at,
            lifetime,
            &self.config.issuer,
            &self.config.audience,
        );
        let expires_at = claims
            .expires_at()
            .ok_or(DomainError::Token(TokenError::SigningFailed))?;

        let header = Header::new(self.config.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(user_id = %identity.user_id, error = %e, "Failed to sign extension token");
            DomainError::Token(TokenError::SigningFailed)
        })?;

        debug!(user_id = %identity.user_id, token_version, %expires_at, "Minted extension token");

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }
}

impl TokenSigner for JwtTokenSigner {
    fn issue(&self, identity: &Identity, token_version: i64) -> DomainResult<IssuedToken> {
        self.issue_at(identity, token_version, self.config.token_lifetime, Utc::now())
    }
}
