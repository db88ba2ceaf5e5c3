//! Extension authentication service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ext_shared::config::RateLimitConfig;
use tracing::{info, warn};

use crate::domain::entities::{IssuedToken, SessionUser, VerifiedToken};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::TokenVersionRepository;
use crate::services::rate_limit::{RateLimitRule, RateLimiter};
use crate::services::token::{RefreshPolicy, RevocationService, TokenSigner, TokenVerifier};

/// Rate limit action names, used as counter key prefixes
const ISSUE_ACTION: &str = "extension_token_issue";
const REFRESH_ACTION: &str = "extension_token_refresh";

/// Configuration for the extension authentication service
#[derive(Debug, Clone)]
pub struct ExtensionAuthConfig {
    pub rate_limiting_enabled: bool,
    pub issue_limit: RateLimitRule,
    pub refresh_limit: RateLimitRule,
}

impl Default for ExtensionAuthConfig {
    fn default() -> Self {
        Self::from(&RateLimitConfig::default())
    }
}

impl From<&RateLimitConfig> for ExtensionAuthConfig {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            rate_limiting_enabled: config.enabled,
            issue_limit: RateLimitRule::from_limit(ISSUE_ACTION, &config.issue),
            refresh_limit: RateLimitRule::from_limit(REFRESH_ACTION, &config.refresh),
        }
    }
}

/// Result of a refresh call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Token was inside its refresh window; a new independent token was minted
    Refreshed(IssuedToken),
    /// Too early to refresh; the presented token is handed back unchanged
    NotYetEligible {
        token: String,
        expires_at: DateTime<Utc>,
    },
}

/// Extension token use cases
///
/// Stateless apart from the per-user version counter and the rate limiter,
/// so a single instance is shared by every request.
pub struct ExtensionAuthService {
    signer: Arc<dyn TokenSigner>,
    verifier: Arc<dyn TokenVerifier>,
    versions: Arc<dyn TokenVersionRepository>,
    revocation: RevocationService,
    rate_limiter: Arc<dyn RateLimiter>,
    policy: RefreshPolicy,
    config: ExtensionAuthConfig,
}

impl ExtensionAuthService {
    /// Creates a new extension auth service
    ///
    /// # Arguments
    ///
    /// * `signer` - Mints tokens
    /// * `verifier` - Checks presented tokens
    /// * `versions` - Per-user token version store, also used for revocation
    /// * `rate_limiter` - Fixed-window counter for issue and refresh
    /// * `policy` - Refresh eligibility
    /// * `config` - Rate limit rules
    pub fn new(
        signer: Arc<dyn TokenSigner>,
        verifier: Arc<dyn TokenVerifier>,
        versions: Arc<dyn TokenVersionRepository>,
        rate_limiter: Arc<dyn RateLimiter>,
        policy: RefreshPolicy,
        config: ExtensionAuthConfig,
    ) -> Self {
        let revocation = RevocationService::new(versions.clone());
        Self {
            signer,
            verifier,
            versions,
            revocation,
            rate_limiter,
            policy,
            config,
        }
    }

    /// Mint a token for the user behind a web session
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Token bound to the user's current version
    /// * `Err(AuthError::EmailRequired)` - User has no email; nothing was signed
    /// * `Err(AuthError::RateLimitExceeded)` - Too many tokens minted recently
    /// * `Err(DomainError)` - Version lookup or signing failed
    pub async fn issue_token(&self, user: &SessionUser) -> DomainResult<IssuedToken> {
        let identity = user.identity().ok_or(AuthError::EmailRequired)?;

        self.enforce_rate_limit(&self.config.issue_limit, &identity.user_id)
            .await?;

        let version = self
            .versions
            .current_version(&identity.user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("user {}", identity.user_id),
            })?;

        let issued = self.signer.issue(&identity, version)?;
        info!(user_id = %identity.user_id, token_version = version, "Issued extension token");
        Ok(issued)
    }

    /// Verify a token presented by the extension
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedToken)` - Token is genuine, live and not revoked
    /// * `Err(TokenError::InvalidOrExpired)` - Token must be rejected
    /// * `Err(DomainError)` - Verifier itself failed
    pub async fn validate_token(&self, token: &str) -> DomainResult<VerifiedToken> {
        self.verifier
            .verify(token)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidOrExpired))
    }

    /// Exchange a token that is close to expiry for a new one
    ///
    /// Outside the refresh window the same token is returned and nothing is
    /// minted. Refreshing does not invalidate the presented token.
    ///
    /// The new token carries the version of the token just verified rather
    /// than a fresh read, so a revocation racing with this call leaves the
    /// new token already revoked.
    pub async fn refresh_token(&self, token: &str) -> DomainResult<RefreshOutcome> {
        let verified = self.validate_token(token).await?;

        self.enforce_rate_limit(&self.config.refresh_limit, &verified.user_id)
            .await?;

        if !self.policy.is_in_refresh_window(verified.expires_at) {
            return Ok(RefreshOutcome::NotYetEligible {
                token: token.to_string(),
                expires_at: verified.expires_at,
            });
        }

        let issued = self
            .signer
            .issue(&verified.identity(), verified.token_version)?;
        info!(
            user_id = %verified.user_id,
            old_expires_at = %verified.expires_at,
            new_expires_at = %issued.expires_at,
            "Refreshed extension token"
        );
        Ok(RefreshOutcome::Refreshed(issued))
    }

    /// Invalidate every token held by `user_id`
    pub async fn revoke_all(&self, user_id: &str) -> DomainResult<()> {
        self.revocation.revoke(user_id).await
    }

    async fn enforce_rate_limit(&self, rule: &RateLimitRule, user_id: &str) -> DomainResult<()> {
        if !self.config.rate_limiting_enabled {
            return Ok(());
        }

        let decision = self
            .rate_limiter
            .check(&rule.key_for(user_id), rule.quota, rule.window)
            .await?;

        if decision.allowed {
            return Ok(());
        }

        warn!(
            user_id,
            action = rule.action,
            retry_after = decision.retry_after_seconds,
            "Rate limit exceeded"
        );
        Err(DomainError::Auth(AuthError::RateLimitExceeded {
            limit: rule.quota,
            retry_after_seconds: decision.retry_after_seconds,
            reset_at: decision.reset_at.timestamp(),
        }))
    }
}
