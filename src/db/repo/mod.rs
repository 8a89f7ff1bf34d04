//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by table:
//! - `users.rs` - User accounts
//! - `incidents.rs` - Cyber incidents
//! - `datasets.rs` - Dataset metadata
//! - `tickets.rs` - IT tickets
//!
//! Every method opens its own connection, runs one statement and closes the
//! connection again. Updates and deletes succeed even when no row matched.

mod datasets;
mod incidents;
mod tickets;
mod users;

use super::connection::Database;

/// Repository for database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    db: Database,
}

impl Repository {
    /// Create a new repository over the given connection provider.
    pub fn new(db: Database) -> Self {
        Repository { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
