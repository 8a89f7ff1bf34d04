use super::Repository;
use crate::domain::{StoredUser, User};
use crate::error::AppError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Connection, Row};

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        role: row.get("role"),
    }
}

impl Repository {
    /// Insert a user and return its id.
    ///
    /// # Errors
    /// Returns `AppError::DuplicateKey` if the username is taken.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<i64, AppError> {
        let mut conn = self.db.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(&mut conn)
        .await
        .map_err(|e| AppError::from_insert(e, "user", username))?;
        conn.close().await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert `(username, password_hash)` pairs in one transaction, skipping
    /// usernames that already exist. Rows get the default role.
    ///
    /// Returns the number of newly inserted users.
    pub async fn insert_users_if_absent(
        &self,
        users: &[(String, String)],
    ) -> Result<usize, sqlx::Error> {
        if users.is_empty() {
            return Ok(0);
        }

        let mut conn = self.db.connect().await?;
        let mut total_inserted = 0usize;
        let mut tx = conn.begin().await?;

        for (username, password_hash) in users {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO users (username, password_hash)
                VALUES (?, ?)
                "#,
            )
            .bind(username)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() > 0 {
                total_inserted += 1;
            }
        }

        tx.commit().await?;
        conn.close().await?;
        Ok(total_inserted)
    }

    /// Look up a user, including the password hash, by username.
    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        Ok(row.map(|r| StoredUser {
            id: r.get("id"),
            username: r.get("username"),
            password_hash: r.get("password_hash"),
            role: r.get("role"),
        }))
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let row = sqlx::query("SELECT id, username, role FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut conn)
            .await?;
        conn.close().await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// All users in store order. Password hashes are not selected.
    pub async fn get_all_users(&self) -> Result<Vec<User>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let rows = sqlx::query("SELECT id, username, role FROM users")
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    pub async fn update_user_role(&self, id: i64, role: &str) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role)
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;
        conn.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::repo::test_support::setup_test_db;
    use crate::domain::DEFAULT_ROLE;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo.create_user("alice", "hash-a", DEFAULT_ROLE).await.unwrap();

        let stored = repo.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.password_hash, "hash-a");
        assert_eq!(stored.role, "user");

        let by_id = repo.get_user_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[tokio::test]
    async fn test_lookup_missing_user_is_none() {
        let (repo, _temp) = setup_test_db().await;

        assert!(repo.get_user_by_username("ghost").await.unwrap().is_none());
        assert!(repo.get_user_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_duplicate_key() {
        let (repo, _temp) = setup_test_db().await;

        repo.create_user("alice", "hash-a", "admin").await.unwrap();
        let err = repo
            .create_user("alice", "hash-b", "user")
            .await
            .unwrap_err();

        match err {
            AppError::DuplicateKey { entity, key } => {
                assert_eq!(entity, "user");
                assert_eq!(key, "alice");
            }
            other => panic!("Expected DuplicateKey, got {:?}", other),
        }

        let stored = repo.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hash-a");
        assert_eq!(stored.role, "admin");
    }

    #[tokio::test]
    async fn test_get_all_users_in_insertion_order() {
        let (repo, _temp) = setup_test_db().await;

        repo.create_user("carol", "h", "user").await.unwrap();
        repo.create_user("alice", "h", "admin").await.unwrap();

        let users = repo.get_all_users().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["carol", "alice"]);
    }

    #[tokio::test]
    async fn test_update_role_and_delete() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo.create_user("alice", "h", "user").await.unwrap();
        repo.update_user_role(id, "analyst").await.unwrap();
        assert_eq!(
            repo.get_user_by_id(id).await.unwrap().unwrap().role,
            "analyst"
        );

        repo.update_user_role(id + 100, "admin").await.unwrap();

        repo.delete_user(id).await.unwrap();
        repo.delete_user(id).await.unwrap();
        assert!(repo.get_all_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_users_if_absent_skips_existing() {
        let (repo, _temp) = setup_test_db().await;

        repo.create_user("alice", "original", "admin").await.unwrap();
        let inserted = repo
            .insert_users_if_absent(&[
                ("alice".to_string(), "replacement".to_string()),
                ("bob".to_string(), "hash-b".to_string()),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        let alice = repo.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(alice.password_hash, "original");
        let bob = repo.get_user_by_username("bob").await.unwrap().unwrap();
        assert_eq!(bob.role, DEFAULT_ROLE);
    }
}
