//! Value objects for the domain layer.

pub mod rate_limit;

pub use rate_limit::RateLimitDecision;
