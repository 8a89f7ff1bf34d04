pub mod assistant;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod import;

pub use assistant::{Assistant, AssistantError, OllamaAssistant};
pub use auth::{AuthService, PasswordScheme, Session, SessionState};
pub use config::Config;
pub use db::{init_db, Database, Repository};
pub use domain::{
    calculate_size_mb, severity_level, CategoryCount, Dataset, Incident, NewDataset, NewIncident,
    NewTicket, ResolutionTrendPoint, StoredUser, Ticket, User,
};
pub use error::AppError;
pub use import::{ImportError, LoadReport, MigrationReport};
