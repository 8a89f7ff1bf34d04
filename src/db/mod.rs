//! Database module for SQLite operations.
//!
//! This module provides:
//! - The per-call connection provider
//! - Idempotent schema initialization
//! - Repository layer for the four platform tables

pub mod connection;
pub mod migrations;
pub mod repo;

pub use connection::Database;
pub use migrations::{init_db, init_schema};
pub use repo::Repository;
