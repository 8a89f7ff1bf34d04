use super::Repository;
use crate::domain::{CategoryCount, Incident, NewIncident, STATUS_OPEN};
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

fn incident_from_row(row: &SqliteRow) -> Incident {
    Incident {
        incident_id: row.get("incident_id"),
        timestamp: row.get("timestamp"),
        severity: row.get("severity"),
        category: row.get("category"),
        status: row.get("status"),
        description: row.get("description"),
    }
}

/// Insert one incident on an open connection or transaction.
pub(crate) async fn insert_incident(
    conn: &mut SqliteConnection,
    incident: &NewIncident,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO cyber_incidents (incident_id, timestamp, severity, category, status, description)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(incident.incident_id)
    .bind(incident.timestamp.as_deref())
    .bind(&incident.severity)
    .bind(incident.category.as_deref())
    .bind(incident.status.as_deref().unwrap_or(STATUS_OPEN))
    .bind(incident.description.as_deref())
    .execute(conn)
    .await
    .map_err(|e| {
        let key = incident
            .incident_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        AppError::from_insert(e, "incident", key)
    })?;

    Ok(result.last_insert_rowid())
}

impl Repository {
    /// Insert a cyber incident and return its id.
    ///
    /// # Errors
    /// Returns `AppError::DuplicateKey` if a caller-supplied id already exists.
    pub async fn create_incident(&self, incident: &NewIncident) -> Result<i64, AppError> {
        let mut conn = self.db.connect().await?;
        let id = insert_incident(&mut conn, incident).await?;
        conn.close().await?;
        Ok(id)
    }

    /// Insert many incidents in a single transaction.
    ///
    /// Returns the number of inserted rows. Nothing is committed if any insert fails.
    pub async fn insert_incidents_batch(&self, incidents: &[NewIncident]) -> Result<usize, AppError> {
        if incidents.is_empty() {
            return Ok(0);
        }

        let mut conn = self.db.connect().await?;
        let mut tx = conn.begin().await?;
        for incident in incidents {
            insert_incident(&mut *tx, incident).await?;
        }
        tx.commit().await?;
        conn.close().await?;

        Ok(incidents.len())
    }

    /// All incidents in store order.
    pub async fn get_all_incidents(&self) -> Result<Vec<Incident>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT incident_id, timestamp, severity, category, status, description
            FROM cyber_incidents
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows.iter().map(incident_from_row).collect())
    }

    pub async fn update_incident_status(&self, id: i64, status: &str) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("UPDATE cyber_incidents SET status = ? WHERE incident_id = ?")
            .bind(status)
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }

    /// Overwrite every column of the incident with `incident.incident_id`.
    pub async fn update_incident(&self, incident: &Incident) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query(
            r#"
            UPDATE cyber_incidents
            SET timestamp = ?, severity = ?, category = ?, status = ?, description = ?
            WHERE incident_id = ?
            "#,
        )
        .bind(incident.timestamp.as_deref())
        .bind(&incident.severity)
        .bind(incident.category.as_deref())
        .bind(&incident.status)
        .bind(incident.description.as_deref())
        .bind(incident.incident_id)
        .execute(&mut conn)
        .await?;
        conn.close().await?;
        Ok(())
    }

    pub async fn delete_incident(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("DELETE FROM cyber_incidents WHERE incident_id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }

    /// Incident counts per severity label, most frequent first.
    pub async fn count_incidents_by_severity(&self) -> Result<Vec<CategoryCount>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT severity AS label, COUNT(*) AS count
            FROM cyber_incidents
            GROUP BY severity
            ORDER BY count DESC, label ASC
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows
            .iter()
            .map(|r| CategoryCount {
                label: r.get("label"),
                count: r.get("count"),
            })
            .collect())
    }
}
