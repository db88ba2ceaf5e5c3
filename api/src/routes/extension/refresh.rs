use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use ext_core::services::{extract_token, RefreshOutcome, TokenCandidates, REFRESH_TOKEN_SOURCES};

use crate::dto::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/extension/refresh
///
/// Takes the token from `Authorization: Bearer <token>`, or from a JSON body
/// `{"token": "..."}` when the header yields none. The body is optional and
/// an unparsable body is treated as absent.
///
/// Outside the refresh window the same token is returned with a message;
/// inside it a new token is minted.
///
/// ## Errors
/// - 401 Unauthorized: No token found, or token rejected
/// - 429 Too Many Requests: Refresh quota exhausted
/// - 500 Internal Server Error: Verification or signing failed
pub async fn refresh_token(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let request: RefreshTokenRequest = serde_json::from_slice(&body).unwrap_or_default();
    let candidates = TokenCandidates {
        authorization: req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
        body_token: request.token.as_deref(),
    };
    let token = extract_token(&REFRESH_TOKEN_SOURCES, &candidates).ok_or(ApiError::MissingToken)?;

    let outcome = state
        .auth_service
        .refresh_token(token)
        .await
        .map_err(|e| ApiError::from_domain(e, "Token refresh failed"))?;

    let response = match outcome {
        RefreshOutcome::Refreshed(issued) => RefreshTokenResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            message: None,
        },
        RefreshOutcome::NotYetEligible { token, expires_at } => RefreshTokenResponse {
            token,
            expires_at,
            message: Some("Token is not yet eligible for refresh".to_string()),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}
