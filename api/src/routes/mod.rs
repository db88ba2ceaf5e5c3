//! Route handlers

pub mod extension;
