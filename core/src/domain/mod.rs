//! Domain entities and value objects.

pub mod entities;
pub mod value_objects;

pub use entities::{ExtensionClaims, Identity, IssuedToken, SessionUser, VerifiedToken};
pub use value_objects::RateLimitDecision;
