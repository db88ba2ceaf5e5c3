//! Domain entities for extension authentication.

pub mod identity;
pub mod token;

pub use identity::{Identity, SessionUser};
pub use token::{ExtensionClaims, IssuedToken, VerifiedToken};
