//! Domain types for the platform's four tables.
//!
//! Severity, priority, status and role are free-form strings. The only values
//! with meaning in code are the default status (`open`), the status written
//! when a ticket is closed (`closed`), and the default user role (`user`).

pub mod dataset;
pub mod incident;
pub mod stats;
pub mod ticket;
pub mod user;

pub use dataset::{calculate_size_mb, Dataset, NewDataset};
pub use incident::{severity_level, Incident, NewIncident};
pub use stats::{CategoryCount, ResolutionTrendPoint};
pub use ticket::{NewTicket, Ticket};
pub use user::{StoredUser, User, DEFAULT_ROLE};

/// Status given to incidents and tickets created without one.
pub const STATUS_OPEN: &str = "open";

/// Status written by `close_ticket`.
pub const STATUS_CLOSED: &str = "closed";
