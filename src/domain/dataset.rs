//! Dataset metadata records and size estimation.

use serde::{Deserialize, Serialize};

const BYTES_PER_CELL: f64 = 8.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Fields for inserting a dataset metadata row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDataset {
    #[serde(default)]
    pub dataset_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub rows: Option<i64>,
    #[serde(default)]
    pub columns: Option<i64>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
}

impl NewDataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            dataset_id: None,
            name: name.into(),
            rows: None,
            columns: None,
            uploaded_by: None,
            upload_date: None,
        }
    }

    pub fn with_id(mut self, dataset_id: i64) -> Self {
        self.dataset_id = Some(dataset_id);
        self
    }

    pub fn with_shape(mut self, rows: i64, columns: i64) -> Self {
        self.rows = Some(rows);
        self.columns = Some(columns);
        self
    }

    pub fn with_uploaded_by(mut self, uploaded_by: impl Into<String>) -> Self {
        self.uploaded_by = Some(uploaded_by.into());
        self
    }

    pub fn with_upload_date(mut self, upload_date: impl Into<String>) -> Self {
        self.upload_date = Some(upload_date.into());
        self
    }
}

/// A stored `datasets_metadata` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub dataset_id: i64,
    pub name: String,
    pub rows: Option<i64>,
    pub columns: Option<i64>,
    pub uploaded_by: Option<String>,
    pub upload_date: Option<String>,
}

impl Dataset {
    pub fn calculate_size_mb(&self) -> f64 {
        calculate_size_mb(self.rows, self.columns)
    }
}

/// Estimated size in MB assuming 8 bytes per cell, rounded to 2 decimals.
///
/// A value exactly halfway between two hundredths rounds to the even one.
/// Returns 0.0 when either dimension is unknown.
pub fn calculate_size_mb(rows: Option<i64>, columns: Option<i64>) -> f64 {
    match (rows, columns) {
        (Some(rows), Some(columns)) => {
            let mb = rows as f64 * columns as f64 * BYTES_PER_CELL / BYTES_PER_MB;
            (mb * 100.0).round_ties_even() / 100.0
        }
        _ => 0.0,
    }
}
