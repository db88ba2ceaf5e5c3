pub mod auth;
pub mod cors;

pub use auth::{ExtensionIdentity, ExtensionTokenAuth};
pub use cors::create_cors;
