//! Registration and login against the `users` table.

use super::PasswordScheme;
use crate::db::Repository;
use crate::domain::{User, DEFAULT_ROLE};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct AuthService {
    repo: Arc<Repository>,
    scheme: PasswordScheme,
}

impl AuthService {
    pub fn new(repo: Arc<Repository>, scheme: PasswordScheme) -> Self {
        Self { repo, scheme }
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Register a user with the default role.
    ///
    /// Returns `Ok(false)` if the username already exists; the existing row is untouched.
    pub async fn register(&self, username: &str, password: &str) -> Result<bool, AppError> {
        self.register_with_role(username, password, DEFAULT_ROLE)
            .await
    }

    pub async fn register_with_role(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<bool, AppError> {
        let password_hash = self.scheme.hash(password)?;

        match self.repo.create_user(username, &password_hash, role).await {
            Ok(id) => {
                info!(user_id = id, username = %username, "Registered user");
                Ok(true)
            }
            Err(e) if e.is_duplicate_key() => {
                info!(username = %username, "Registration rejected: username already exists");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Check credentials and return the user view on success.
    ///
    /// Unknown usernames and wrong passwords both yield `Ok(None)`.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>, AppError> {
        let Some(stored) = self.repo.get_user_by_username(username).await? else {
            return Ok(None);
        };

        if self.scheme.verify(password, &stored.password_hash) {
            Ok(Some(stored.into_user()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MIN_BCRYPT_COST;
    use crate::db::repo::test_support::setup_test_db;

    async fn setup_service(scheme: PasswordScheme) -> (AuthService, Arc<Repository>, tempfile::TempDir) {
        let (repo, temp) = setup_test_db().await;
        let repo = Arc::new(repo);
        (AuthService::new(repo.clone(), scheme), repo, temp)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (auth, _repo, _temp) =
            setup_service(PasswordScheme::Bcrypt { cost: MIN_BCRYPT_COST }).await;

        assert!(auth.register("alice", "s3cret!").await.unwrap());

        let user = auth.login("alice", "s3cret!").await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, "user");
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let (auth, repo, _temp) = setup_service(PasswordScheme::Sha256).await;

        auth.register("alice", "s3cret!").await.unwrap();
        let stored = repo.get_user_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret!");
        assert_eq!(stored.password_hash.len(), 64);
    }

    #[tokio::test]
    async fn test_login_wrong_password_or_unknown_user() {
        let (auth, _repo, _temp) = setup_service(PasswordScheme::Sha256).await;

        auth.register("alice", "right").await.unwrap();
        assert!(auth.login("alice", "wrong").await.unwrap().is_none());
        assert!(auth.login("bob", "right").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration_returns_false() {
        let (auth, repo, _temp) = setup_service(PasswordScheme::Sha256).await;

        assert!(auth.register_with_role("alice", "first", "admin").await.unwrap());
        let before = repo.get_user_by_username("alice").await.unwrap().unwrap();

        assert!(!auth.register("alice", "second").await.unwrap());

        let after = repo.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(before, after);
        assert!(auth.login("alice", "first").await.unwrap().is_some());
        assert!(auth.login("alice", "second").await.unwrap().is_none());
    }
}
