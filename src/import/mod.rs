//! One-shot importers: the legacy credentials file and CSV bulk loads.
//!
//! Both treat a missing input file as "nothing to import" and log a warning.

pub mod csv_loader;
pub mod legacy_users;

pub use csv_loader::{
    load_all_csv, load_datasets_csv, load_incidents_csv, load_tickets_csv, LoadReport,
};
pub use legacy_users::{migrate_legacy_users, parse_legacy_users, MigrationReport};

use crate::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv parse error in {path}: {message}")]
    Csv { path: String, message: String },
    #[error("malformed credentials line {line}: expected `username,hash`")]
    MalformedLine { line: u64 },
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<sqlx::Error> for ImportError {
    fn from(err: sqlx::Error) -> Self {
        ImportError::Storage(AppError::Storage(err))
    }
}
