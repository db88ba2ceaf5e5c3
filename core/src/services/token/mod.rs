//! Token service module for extension tokens
//!
//! This module handles all token-related operations including:
//! - Minting signed tokens that embed identity and token version
//! - Verifying signature, expiry and version against the stored counter
//! - Deciding when a token may be exchanged for a fresh one
//! - Revoking every token of a user by bumping the version
//! - Caching the version lookup without delaying revocation

mod config;
mod refresh_policy;
mod revocation;
mod signer;
mod verifier;
mod version_cache;

#[cfg(test)]
pub(crate) mod tests;

pub use config::TokenServiceConfig;
pub use refresh_policy::{is_in_refresh_window, RefreshPolicy, REFRESH_WINDOW_DAYS};
pub use revocation::RevocationService;
pub use signer::{JwtTokenSigner, TokenSigner};
pub use verifier::{JwtTokenVerifier, TokenVerifier};
pub use version_cache::{CachedTokenVersionRepository, TokenVersionCache};
