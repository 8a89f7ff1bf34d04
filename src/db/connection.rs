//! Connection provider for the platform database file.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteSynchronous};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Handle to the SQLite file at a fixed path.
///
/// Holds no open connection. Every call to [`Database::connect`] opens a new
/// one, which the caller closes when its statement is done. A connection that
/// is dropped on an error path is released by its `Drop` impl.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Database { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection, creating the database file if absent.
    ///
    /// The parent directory is not created; a missing directory is an error.
    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        debug!(path = %self.path.display(), "Opening SQLite connection");

        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .synchronous(SqliteSynchronous::Normal)
            .connect()
            .await
    }
}
