//! # Extension Token Core
//!
//! Domain layer for the browser-extension token service: stateless bearer
//! tokens bound to a user, verified against a per-user token version and
//! revoked for every device at once by bumping that version.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ExtensionClaims, Identity, IssuedToken, RateLimitDecision, SessionUser, VerifiedToken,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{SessionRepository, TokenVersionRepository};
pub use services::{
    ExtensionAuthConfig, ExtensionAuthService, JwtTokenSigner, JwtTokenVerifier, RateLimiter,
    RefreshOutcome, RefreshPolicy, RevocationService, TokenSigner, TokenVerifier,
};
