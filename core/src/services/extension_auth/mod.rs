//! Extension authentication use cases
//!
//! Composes the token signer, verifier, refresh policy, revocation service
//! and rate limiter into the operations the HTTP layer exposes.

mod service;
mod token_source;


pub use service::{ExtensionAuthConfig, ExtensionAuthService, RefreshOutcome};
pub use token_source::{
    extract_token, parse_bearer, BearerError, TokenCandidates, TokenSource, BEARER_PREFIX,
    REFRESH_TOKEN_SOURCES,
};
