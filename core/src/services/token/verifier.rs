//! Token verification.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::{debug, warn};

use crate::domain::entities::{ExtensionClaims, VerifiedToken};
use crate::errors::DomainResult;
use crate::repositories::TokenVersionRepository;

use super::config::TokenServiceConfig;

/// Verifies presented tokens
///
/// `Ok(None)` means the token must be rejected. `Err` is reserved for
/// failures the caller should report as a server error; [`JwtTokenVerifier`]
/// folds every failure it knows about into `Ok(None)`.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> DomainResult<Option<VerifiedToken>>;
}

/// Fail-closed verifier for tokens minted by [`super::JwtTokenSigner`]
///
/// Checks, in order: signature and issuer/audience, time claims, then the
/// embedded version against the stored one. No retries.
pub struct JwtTokenVerifier {
    versions: Arc<dyn TokenVersionRepository>,
    decoding_key: DecodingKey,
    validation: Validation,
    lookup_timeout: std::time::Duration,
}

impl JwtTokenVerifier {
    pub fn new(versions: Arc<dyn TokenVersionRepository>, config: &TokenServiceConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "sub", "iss", "aud"]);
        // Expiry is checked against an explicit `now` in `verify_at`
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            versions,
            decoding_key,
            validation,
            lookup_timeout: config.version_lookup_timeout,
        }
    }

    /// Signature and claim-shape check only; no time or version check
    pub fn decode_claims(&self, token: &str) -> Option<ExtensionClaims> {
        match decode::<ExtensionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "Rejected malformed or tampered extension token");
                None
            }
        }
    }

    /// Full verification as of `now`
    pub async fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<VerifiedToken> {
        let claims = self.decode_claims(token)?;

        if !claims.is_live_at(now) {
            debug!(user_id = %claims.sub, "Rejected expired extension token");
            return None;
        }
        let expires_at = claims.expires_at()?;

        let lookup = self.versions.current_version(&claims.sub);
        let stored_version = match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(Some(version))) => version,
            Ok(Ok(None)) => {
                debug!(user_id = %claims.sub, "Rejected token for unknown user");
                return None;
            }
            Ok(Err(e)) => {
                warn!(user_id = %claims.sub, error = %e, "Token version lookup failed, rejecting token");
                return None;
            }
            Err(_) => {
                warn!(
                    user_id = %claims.sub,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "Token version lookup timed out, rejecting token"
                );
                return None;
            }
        };

        if stored_version != claims.token_version {
            debug!(
                user_id = %claims.sub,
                token_version = claims.token_version,
                stored_version,
                "Rejected revoked extension token"
            );
            return None;
        }

        Some(VerifiedToken {
            user_id: claims.sub,
            email: claims.email,
            token_version: claims.token_version,
            expires_at,
        })
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> DomainResult<Option<VerifiedToken>> {
        Ok(self.verify_at(token, Utc::now()).await)
    }
}
