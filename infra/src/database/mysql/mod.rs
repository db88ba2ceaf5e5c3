//! MySQL repository implementations

mod token_version_repository_impl;

pub use token_version_repository_impl::MySqlTokenVersionRepository;
