use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::{IssueTokenResponse, UserSummary};
use crate::handlers::ApiError;

use super::AppState;

const ISSUE_FAILED: &str = "Failed to generate extension token";

/// Handler for POST /api/v1/extension/token
///
/// Mints a token for the user signed in to the web application. The web
/// session is identified by its cookie; no body is read.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ...",
///     "expiresAt": "2024-01-31T00:00:00Z",
///     "user": { "id": "user-123", "email": "test@example.com", "name": "Test User" }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: The user has no email
/// - 401 Unauthorized: No live web session
/// - 429 Too Many Requests: Issue quota exhausted
/// - 500 Internal Server Error: Session lookup or signing failed
pub async fn issue_token(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let session_id = req
        .cookie(&state.session_cookie)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    let user = state
        .sessions
        .find_session_user(&session_id)
        .await
        .map_err(|e| ApiError::from_domain(e, ISSUE_FAILED))?
        .ok_or(ApiError::Unauthorized)?;

    let issued = state
        .auth_service
        .issue_token(&user)
        .await
        .map_err(|e| ApiError::from_domain(e, ISSUE_FAILED))?;

    Ok(HttpResponse::Ok().json(IssueTokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: UserSummary::from(&user),
    }))
}
