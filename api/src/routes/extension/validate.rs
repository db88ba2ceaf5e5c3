use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use ext_core::services::parse_bearer;

use crate::dto::ValidateTokenResponse;
use crate::handlers::ApiError;

use super::AppState;

/// Handler for GET /api/v1/extension/validate
///
/// Requires `Authorization: Bearer <token>`. A missing or non-Bearer header
/// and an empty Bearer value are reported with different messages.
///
/// ## Errors
/// - 401 Unauthorized: Missing header, empty token, or token rejected
/// - 500 Internal Server Error: Verification itself failed
pub async fn validate_token(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = parse_bearer(header)?;

    let verified = state
        .auth_service
        .validate_token(token)
        .await
        .map_err(|e| ApiError::from_domain(e, "Token validation failed"))?;

    Ok(HttpResponse::Ok().json(ValidateTokenResponse::from(verified)))
}
