//! Aggregates used by the dashboard charts.

use serde::{Deserialize, Serialize};

/// Row count for one value of a free-text classification column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: i64,
}

/// Average resolution hours for tickets sharing a `created_at` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionTrendPoint {
    pub created_at: Option<String>,
    pub avg_resolution_hours: Option<f64>,
}
