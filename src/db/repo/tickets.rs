use super::Repository;
use crate::domain::{
    CategoryCount, NewTicket, ResolutionTrendPoint, Ticket, STATUS_CLOSED, STATUS_OPEN,
};
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

fn ticket_from_row(row: &SqliteRow) -> Ticket {
    Ticket {
        ticket_id: row.get("ticket_id"),
        priority: row.get("priority"),
        description: row.get("description"),
        status: row.get("status"),
        assigned_to: row.get("assigned_to"),
        created_at: row.get("created_at"),
        resolution_time_hours: row.get("resolution_time_hours"),
    }
}

pub(crate) async fn insert_ticket(
    conn: &mut SqliteConnection,
    ticket: &NewTicket,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO it_tickets
        (ticket_id, priority, description, status, assigned_to, created_at, resolution_time_hours)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(ticket.ticket_id)
    .bind(&ticket.priority)
    .bind(ticket.description.as_deref())
    .bind(ticket.status.as_deref().unwrap_or(STATUS_OPEN))
    .bind(ticket.assigned_to.as_deref())
    .bind(ticket.created_at.as_deref())
    .bind(ticket.resolution_time_hours)
    .execute(conn)
    .await
    .map_err(|e| {
        let key = ticket
            .ticket_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        AppError::from_insert(e, "ticket", key)
    })?;

    Ok(result.last_insert_rowid())
}

impl Repository {
    /// Insert an IT ticket and return its id.
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<i64, AppError> {
        let mut conn = self.db.connect().await?;
        let id = insert_ticket(&mut conn, ticket).await?;
        conn.close().await?;
        Ok(id)
    }

    /// Insert many tickets in a single transaction.
    pub async fn insert_tickets_batch(&self, tickets: &[NewTicket]) -> Result<usize, AppError> {
        if tickets.is_empty() {
            return Ok(0);
        }

        let mut conn = self.db.connect().await?;
        let mut tx = conn.begin().await?;
        for ticket in tickets {
            insert_ticket(&mut *tx, ticket).await?;
        }
        tx.commit().await?;
        conn.close().await?;

        Ok(tickets.len())
    }

    pub async fn get_all_tickets(&self) -> Result<Vec<Ticket>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT ticket_id, priority, description, status, assigned_to,
                   created_at, resolution_time_hours
            FROM it_tickets
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows.iter().map(ticket_from_row).collect())
    }

    pub async fn update_ticket_status(&self, id: i64, status: &str) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("UPDATE it_tickets SET status = ? WHERE ticket_id = ?")
            .bind(status)
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }

    pub async fn assign_ticket(&self, id: i64, assignee: &str) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("UPDATE it_tickets SET assigned_to = ? WHERE ticket_id = ?")
            .bind(assignee)
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }

    /// Mark a ticket closed and record how long it took to resolve.
    pub async fn close_ticket(&self, id: i64, resolution_time_hours: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query(
            r#"
            UPDATE it_tickets
            SET status = ?, resolution_time_hours = ?
            WHERE ticket_id = ?
            "#,
        )
        .bind(STATUS_CLOSED)
        .bind(resolution_time_hours)
        .bind(id)
        .execute(&mut conn)
        .await?;
        conn.close().await?;
        Ok(())
    }

    pub async fn delete_ticket(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("DELETE FROM it_tickets WHERE ticket_id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }

    /// Ticket counts per priority label, most frequent first.
    pub async fn count_tickets_by_priority(&self) -> Result<Vec<CategoryCount>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT priority AS label, COUNT(*) AS count
            FROM it_tickets
            GROUP BY priority
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

    /// Average resolution hours per `created_at` value, oldest first.
    ///
    /// Tickets without a resolution time are ignored by the average; a day
    /// with only open tickets yields `None`.
    pub async fn get_resolution_trend(&self) -> Result<Vec<ResolutionTrendPoint>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT created_at, AVG(resolution_time_hours) AS avg_hours
            FROM it_tickets
            GROUP BY created_at
            ORDER BY created_at
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows
            .iter()
            .map(|r| ResolutionTrendPoint {
                created_at: r.get("created_at"),
                avg_resolution_hours: r.get("avg_hours"),
            })
            .collect())
    }
}
