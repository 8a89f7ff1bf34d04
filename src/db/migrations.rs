//! Schema initialization.
//!
//! Tables are declared with `CREATE TABLE IF NOT EXISTS`. Existing tables are
//! never altered, so a database created with an older column layout keeps it.

use super::connection::Database;
use sqlx::Connection;
use tracing::info;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Open the database at `db_path` and make sure all tables exist.
pub async fn init_db(db_path: &str) -> Result<Database, sqlx::Error> {
    let db = Database::new(db_path);
    init_schema(&db).await?;

    info!("Database initialized successfully at {}", db_path);
    Ok(db)
}

/// Create the four platform tables if they do not exist yet.
pub async fn init_schema(db: &Database) -> Result<(), sqlx::Error> {
    info!("Creating tables...");
    let mut conn = db.connect().await?;

    for statement in SCHEMA_SQL.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(&mut conn).await?;
        }
    }

    conn.close().await?;
    info!("Tables created / verified successfully");
    Ok(())
}
