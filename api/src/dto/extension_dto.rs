//! Extension token DTOs
//!
//! Field names are camelCase on the wire; timestamps are ISO-8601.

use chrono::{DateTime, Utc};
use ext_core::domain::entities::{SessionUser, VerifiedToken};
use serde::{Deserialize, Serialize};

/// User summary returned alongside a freshly issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<&SessionUser> for UserSummary {
    fn from(user: &SessionUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Response for POST /api/v1/extension/token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// Response for GET /api/v1/extension/validate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub user_id: String,
    pub email: String,
    pub token_version: i64,
    pub expires_at: DateTime<Utc>,
}

impl From<VerifiedToken> for ValidateTokenResponse {
    fn from(verified: VerifiedToken) -> Self {
        Self {
            user_id: verified.user_id,
            email: verified.email,
            token_version: verified.token_version,
            expires_at: verified.expires_at,
        }
    }
}

/// Optional body of POST /api/v1/extension/refresh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// Response for POST /api/v1/extension/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

/// Response for POST /api/v1/extension/revoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub message: String,
}
