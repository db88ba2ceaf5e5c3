//! Error types for token and authentication operations
//!
//! Messages here are for logs. The HTTP layer decides what the client sees.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User email is required")]
    EmailRequired,

    #[error("Rate limit exceeded: retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        limit: u32,
        retry_after_seconds: u64,
        reset_at: i64,
    },
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Bad signature, expired, or revoked; deliberately not told apart
    #[error("Invalid or expired token")]
    InvalidOrExpired,

    #[error("Token signing failed")]
    SigningFailed,

    #[error("Token verification failed: {message}")]
    VerificationFailed { message: String },

    #[error("Token revocation failed: {message}")]
    RevocationFailed { message: String },
}
