//! Bulk loading of headered CSV exports into the incident, dataset and ticket tables.
//!
//! Column names in the header must match the table's column names. Missing
//! optional columns load as NULL. Rows are appended; ids that already exist
//! abort the file's transaction.

use super::ImportError;
use crate::db::Repository;
use crate::domain::{NewDataset, NewIncident, NewTicket};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

pub const INCIDENTS_CSV: &str = "cyber_incidents.csv";
pub const DATASETS_CSV: &str = "datasets_metadata.csv";
pub const TICKETS_CSV: &str = "it_tickets.csv";

/// Rows loaded per table by [`load_all_csv`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub incidents: usize,
    pub datasets: usize,
    pub tickets: usize,
}

/// Read and deserialize every row, or `None` if the file does not exist.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, ImportError> {
    if !path.exists() {
        warn!(path = %path.display(), "CSV file not found, skipping");
        return Ok(None);
    }

    let csv_error = |e: csv::Error| ImportError::Csv {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        rows.push(record.map_err(csv_error)?);
    }
    Ok(Some(rows))
}

pub async fn load_incidents_csv(
    repo: &Repository,
    path: impl AsRef<Path>,
) -> Result<usize, ImportError> {
    let path = path.as_ref();
    let Some(rows) = read_rows::<NewIncident>(path)? else {
        return Ok(0);
    };
    let loaded = repo.insert_incidents_batch(&rows).await?;
    info!(path = %path.display(), rows = loaded, "Loaded rows into cyber_incidents");
    Ok(loaded)
}

pub async fn load_datasets_csv(
    repo: &Repository,
    path: impl AsRef<Path>,
) -> Result<usize, ImportError> {
    let path = path.as_ref();
    let Some(rows) = read_rows::<NewDataset>(path)? else {
        return Ok(0);
    };
    let loaded = repo.insert_datasets_batch(&rows).await?;
    info!(path = %path.display(), rows = loaded, "Loaded rows into datasets_metadata");
    Ok(loaded)
}

pub async fn load_tickets_csv(
    repo: &Repository,
    path: impl AsRef<Path>,
) -> Result<usize, ImportError> {
    let path = path.as_ref();
    let Some(rows) = read_rows::<NewTicket>(path)? else {
        return Ok(0);
    };
    let loaded = repo.insert_tickets_batch(&rows).await?;
    info!(path = %path.display(), rows = loaded, "Loaded rows into it_tickets");
    Ok(loaded)
}

/// Load the three standard CSV exports from `dir`, skipping any that are absent.
pub async fn load_all_csv(repo: &Repository, dir: impl AsRef<Path>) -> Result<LoadReport, ImportError> {
    let dir = dir.as_ref();
    Ok(LoadReport {
        incidents: load_incidents_csv(repo, dir.join(INCIDENTS_CSV)).await?,
        datasets: load_datasets_csv(repo, dir.join(DATASETS_CSV)).await?,
        tickets: load_tickets_csv(repo, dir.join(TICKETS_CSV)).await?,
    })
}
