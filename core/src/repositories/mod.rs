//! Collaborator interfaces backed by storage.

pub mod session;
pub mod token_version;

pub use session::SessionRepository;
pub use token_version::TokenVersionRepository;
