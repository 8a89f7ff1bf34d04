//! Platform users.

use serde::{Deserialize, Serialize};

/// Role assigned when none is given.
pub const DEFAULT_ROLE: &str = "user";

/// User view returned to callers. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: String,
}

/// Full `users` row, including the stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl StoredUser {
    /// Drop the hash and keep the public view.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_user_drops_hash() {
        let stored = StoredUser {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$2b$12$abc".to_string(),
            role: "admin".to_string(),
        };
        let user = stored.into_user();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, "admin");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("$2b$"));
    }
}
