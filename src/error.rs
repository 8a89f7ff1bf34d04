use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Duplicate key: {entity} {key} already exists")]
    DuplicateKey { entity: &'static str, key: String },
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("Password hashing error: {0}")]
    Hash(String),
}

impl AppError {
    /// Map an insert failure, turning unique/primary-key violations into `DuplicateKey`.
    pub(crate) fn from_insert(err: sqlx::Error, entity: &'static str, key: impl Into<String>) -> Self {
        let unique_violation =
            matches!(&err, sqlx::Error::Database(db_err) if db_err.is_unique_violation());
        if unique_violation {
            AppError::DuplicateKey {
                entity,
                key: key.into(),
            }
        } else {
            AppError::Storage(err)
        }
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, AppError::DuplicateKey { .. })
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Hash(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_display() {
        let err = AppError::DuplicateKey {
            entity: "user",
            key: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate key: user alice already exists");
        assert!(err.is_duplicate_key());
    }

    #[test]
    fn test_non_constraint_error_stays_storage() {
        let err = AppError::from_insert(sqlx::Error::RowNotFound, "user", "alice");
        assert!(matches!(err, AppError::Storage(sqlx::Error::RowNotFound)));
        assert!(!err.is_duplicate_key());
    }
}
