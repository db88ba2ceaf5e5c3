//! Token entities for extension authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::Identity;

/// Default extension token lifetime (30 days)
pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 30;

/// Version every user starts with before any revocation
pub const INITIAL_TOKEN_VERSION: i64 = 0;

/// Claims structure for the extension token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Email snapshot taken at mint time
    pub email: String,

    /// User's token version at mint time
    #[serde(rename = "tokenVersion")]
    pub token_version: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp; informational, equal to `iat`
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl ExtensionClaims {
    /// Creates claims for a token minted at `issued_at`
    ///
    /// `issued_at` is expected to be whole seconds so that `expires_at()`
    /// round-trips exactly through the encoded token.
    pub fn new(
        identity: &Identity,
        token_version: i64,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let expiry = issued_at + lifetime;

        Self {
            sub: identity.user_id.clone(),
            email: identity.email.clone(),
            token_version,
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            nbf: issued_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expiry as a timestamp, `None` if out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Checks expiry against `now`; `exp` itself is already expired
    ///
    /// `nbf` is not enforced, so a token minted on an instance whose clock
    /// runs ahead is accepted everywhere right away.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(false, |exp| now < exp)
    }
}

/// A freshly minted token as handed back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Identity recovered from a token that passed every check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedToken {
    pub user_id: String,
    pub email: String,
    pub token_version: i64,
    pub expires_at: DateTime<Utc>,
}

impl VerifiedToken {
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id.clone(), self.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_claims_lifetime() {
        let identity = Identity::new("user-123", "test@example.com");
        let claims = ExtensionClaims::new(
            &identity,
            1,
            issued_at(),
            Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS),
            "iss",
            "aud",
        );

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.token_version, 1);
        assert_eq!(claims.expires_at().unwrap(), issued_at() + Duration::days(30));
    }

    #[test]
    fn test_claims_live_window() {
        let identity = Identity::new("u", "e@example.com");
        let claims = ExtensionClaims::new(&identity, 0, issued_at(), Duration::days(1), "i", "a");

        assert!(claims.is_live_at(issued_at()));
        assert!(claims.is_live_at(issued_at() + Duration::hours(23)));
        assert!(!claims.is_live_at(issued_at() + Duration::days(1)));
        // Clock skew between instances
        assert!(claims.is_live_at(issued_at() - Duration::seconds(5)));
    }

    #[test]
    fn test_version_claim_name() {
        let identity = Identity::new("u", "e@example.com");
        let claims = ExtensionClaims::new(&identity, 7, issued_at(), Duration::days(1), "i", "a");
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["tokenVersion"], 7);
        assert_eq!(json["email"], "e@example.com");
    }
}
