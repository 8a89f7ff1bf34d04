use super::Repository;
use crate::domain::{Dataset, NewDataset};
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

fn dataset_from_row(row: &SqliteRow) -> Dataset {
    Dataset {
        dataset_id: row.get("dataset_id"),
        name: row.get("name"),
        rows: row.get("rows"),
        columns: row.get("columns"),
        uploaded_by: row.get("uploaded_by"),
        upload_date: row.get("upload_date"),
    }
}

pub(crate) async fn insert_dataset(
    conn: &mut SqliteConnection,
    dataset: &NewDataset,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO datasets_metadata (dataset_id, name, "rows", "columns", uploaded_by, upload_date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(dataset.dataset_id)
    .bind(&dataset.name)
    .bind(dataset.rows)
    .bind(dataset.columns)
    .bind(dataset.uploaded_by.as_deref())
    .bind(dataset.upload_date.as_deref())
    .execute(conn)
    .await
    .map_err(|e| {
        let key = dataset
            .dataset_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        AppError::from_insert(e, "dataset", key)
    })?;

    Ok(result.last_insert_rowid())
}

impl Repository {
    /// Insert a dataset metadata row and return its id.
    pub async fn create_dataset(&self, dataset: &NewDataset) -> Result<i64, AppError> {
        let mut conn = self.db.connect().await?;
        let id = insert_dataset(&mut conn, dataset).await?;
        conn.close().await?;
        Ok(id)
    }

    /// Insert many datasets in a single transaction.
    pub async fn insert_datasets_batch(&self, datasets: &[NewDataset]) -> Result<usize, AppError> {
        if datasets.is_empty() {
            return Ok(0);
        }

        let mut conn = self.db.connect().await?;
        let mut tx = conn.begin().await?;
        for dataset in datasets {
            insert_dataset(&mut *tx, dataset).await?;
        }
        tx.commit().await?;
        conn.close().await?;

        Ok(datasets.len())
    }

    pub async fn get_all_datasets(&self) -> Result<Vec<Dataset>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT dataset_id, name, "rows", "columns", uploaded_by, upload_date
            FROM datasets_metadata
            "#,
        )
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        Ok(rows.iter().map(dataset_from_row).collect())
    }

    /// Replace the row/column counts that drive the size estimate.
    pub async fn update_dataset_shape(
        &self,
        id: i64,
        rows: Option<i64>,
        columns: Option<i64>,
    ) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query(r#"UPDATE datasets_metadata SET "rows" = ?, "columns" = ? WHERE dataset_id = ?"#)
            .bind(rows)
            .bind(columns)
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }

    pub async fn delete_dataset(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("DELETE FROM datasets_metadata WHERE dataset_id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }
}
