//! Request and response bodies

pub mod error;
pub mod extension_dto;

pub use error::ErrorResponse;
pub use extension_dto::*;
