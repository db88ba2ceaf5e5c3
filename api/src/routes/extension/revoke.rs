use actix_web::{web, HttpResponse};

use crate::dto::RevokeResponse;
use crate::handlers::ApiError;
use crate::middleware::ExtensionIdentity;

use super::AppState;

/// Handler for POST /api/v1/extension/revoke
///
/// Signs the caller out of every extension instance. Runs behind
/// [`ExtensionTokenAuth`](crate::middleware::ExtensionTokenAuth).
pub async fn revoke_tokens(
    state: web::Data<AppState>,
    identity: ExtensionIdentity,
) -> Result<HttpResponse, ApiError> {
    state
        .auth_service
        .revoke_all(&identity.user_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Failed to revoke tokens"))?;

    Ok(HttpResponse::Ok().json(RevokeResponse {
        message: "All extension tokens have been revoked".to_string(),
    }))
}
