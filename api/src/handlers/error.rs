//! Mapping of domain failures to HTTP responses
//!
//! Every response body is `{"error": "..."}`. Infrastructure failures are
//! logged in full here and reach the client only as a fixed message.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use ext_core::errors::{AuthError, DomainError, TokenError};
use ext_core::services::BearerError;

use crate::dto::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing or invalid Authorization header")]
    MissingAuthorization,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User email is required")]
    EmailRequired,

    #[error("Too many requests")]
    RateLimited {
        limit: u32,
        retry_after_seconds: u64,
        reset_at: i64,
    },

    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Translate a domain error; anything not caused by the client becomes
    /// a 500 carrying `fallback`
    pub fn from_domain(error: DomainError, fallback: &'static str) -> Self {
        match error {
            DomainError::Token(TokenError::InvalidOrExpired) => ApiError::InvalidToken,
            DomainError::Auth(AuthError::EmailRequired) => ApiError::EmailRequired,
            DomainError::Auth(AuthError::RateLimitExceeded {
                limit,
                retry_after_seconds,
                reset_at,
            }) => ApiError::RateLimited {
                limit,
                retry_after_seconds,
                reset_at,
            },
            other => {
                log::error!("{}: {}", fallback, other);
                ApiError::Internal(fallback)
            }
        }
    }
}

impl From<BearerError> for ApiError {
    fn from(error: BearerError) -> Self {
        match error {
            BearerError::MissingOrMalformed => ApiError::MissingAuthorization,
            BearerError::EmptyToken => ApiError::MissingToken,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAuthorization
            | ApiError::MissingToken
            | ApiError::InvalidToken
            | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::EmailRequired => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        if let ApiError::RateLimited {
            limit,
            retry_after_seconds,
            reset_at,
        } = self
        {
            response
                .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
                .insert_header(("X-RateLimit-Limit", limit.to_string()))
                .insert_header(("X-RateLimit-Remaining", "0"))
                .insert_header(("X-RateLimit-Reset", reset_at.to_string()));
        }

        response.json(ErrorResponse::new(self.to_string()))
    }
}
