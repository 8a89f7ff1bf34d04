//! Cyber incident records.

use serde::{Deserialize, Serialize};

/// Fields for inserting a cyber incident.
///
/// `incident_id` may be supplied by the caller; when `None` SQLite assigns one.
/// `status` falls back to `open` when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncident {
    #[serde(default)]
    pub incident_id: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub severity: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewIncident {
    pub fn new(severity: impl Into<String>) -> Self {
        Self {
            incident_id: None,
            timestamp: None,
            severity: severity.into(),
            category: None,
            status: None,
            description: None,
        }
    }

    pub fn with_id(mut self, incident_id: i64) -> Self {
        self.incident_id = Some(incident_id);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A stored `cyber_incidents` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub incident_id: i64,
    pub timestamp: Option<String>,
    pub severity: String,
    pub category: Option<String>,
    pub status: String,
    pub description: Option<String>,
}

impl Incident {
    /// Ordinal of this incident's severity, see [`severity_level`].
    pub fn severity_level(&self) -> u8 {
        severity_level(&self.severity)
    }
}

/// Map a severity label to 1..=4 (low, medium, high, critical), case-insensitively.
///
/// Unrecognized labels map to 0.
pub fn severity_level(severity: &str) -> u8 {
    match severity.trim().to_ascii_lowercase().as_str() {
        "low" => 1,
        "medium" => 2,
        "high" => 3,
        "critical" => 4,
        _ => 0,
    }
}
