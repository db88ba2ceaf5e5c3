//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether this error is the client's fault rather than an infrastructure failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. }
                | DomainError::Auth(_)
                | DomainError::Token(TokenError::InvalidOrExpired)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
