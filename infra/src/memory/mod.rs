//! In-process collaborators
//!
//! Suitable for tests and a single server instance; nothing survives a
//! restart and nothing is shared between processes.

mod rate_limiter;
mod session;
mod token_version;
mod version_cache;

pub use rate_limiter::InMemoryRateLimiter;
pub use session::InMemorySessionRepository;
pub use token_version::InMemoryTokenVersionRepository;
pub use version_cache::InMemoryVersionCache;
