//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The MySQL-backed token version repository

pub mod connection;
pub mod mysql;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlTokenVersionRepository;
