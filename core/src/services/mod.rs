//! Business services containing domain logic and use cases.

pub mod extension_auth;
pub mod rate_limit;
pub mod token;

// Re-export commonly used types
pub use extension_auth::{
    extract_token, parse_bearer, BearerError, ExtensionAuthConfig, ExtensionAuthService,
    RefreshOutcome, TokenCandidates, TokenSource, REFRESH_TOKEN_SOURCES,
};
pub use rate_limit::{RateLimitRule, RateLimiter};
pub use token::{
    is_in_refresh_window, CachedTokenVersionRepository, JwtTokenSigner, JwtTokenVerifier,
    RefreshPolicy, RevocationService, TokenServiceConfig, TokenSigner, TokenVerifier,
    TokenVersionCache,
};
