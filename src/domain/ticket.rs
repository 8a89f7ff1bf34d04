//! IT support tickets.

use serde::{Deserialize, Serialize};

/// Fields for inserting an IT ticket.
///
/// `resolution_time_hours` is normally left `None` until the ticket is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    #[serde(default)]
    pub ticket_id: Option<i64>,
    pub priority: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub resolution_time_hours: Option<i64>,
}

impl NewTicket {
    pub fn new(priority: impl Into<String>) -> Self {
        Self {
            ticket_id: None,
            priority: priority.into(),
            description: None,
            status: None,
            assigned_to: None,
            created_at: None,
            resolution_time_hours: None,
        }
    }

    pub fn with_id(mut self, ticket_id: i64) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn with_resolution_time_hours(mut self, hours: i64) -> Self {
        self.resolution_time_hours = Some(hours);
        self
    }
}

/// A stored `it_tickets` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: i64,
    pub priority: String,
    pub description: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_at: Option<String>,
    pub resolution_time_hours: Option<i64>,
}

impl Ticket {
    pub fn is_resolved(&self) -> bool {
        self.resolution_time_hours.is_some()
    }
}
