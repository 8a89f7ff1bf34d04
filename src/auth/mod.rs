//! Password hashing, registration/login and the explicit session object.

pub mod service;
pub mod session;

pub use service::AuthService;
pub use session::{Session, SessionState};

use crate::error::AppError;
use sha2::{Digest, Sha256};
use tracing::warn;

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// How passwords are turned into stored hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Salted bcrypt with the given work factor.
    Bcrypt { cost: u32 },
    /// Unsalted hex-encoded SHA-256, kept for databases written by the old login page.
    Sha256,
}

impl Default for PasswordScheme {
    fn default() -> Self {
        PasswordScheme::Bcrypt {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordScheme {
    /// Hash a password for storage. Empty passwords are hashed like any other.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        match self {
            PasswordScheme::Bcrypt { cost } => Ok(bcrypt::hash(password, *cost)?),
            PasswordScheme::Sha256 => Ok(sha256_hex(password)),
        }
    }

    /// Check `password` against a stored hash.
    ///
    /// A stored hash the scheme cannot parse verifies as `false`.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match self {
            PasswordScheme::Bcrypt { .. } => match bcrypt::verify(password, stored_hash) {
                Ok(valid) => valid,
                Err(e) => {
                    warn!(error = %e, "Stored password hash is not a valid bcrypt hash");
                    false
                }
            },
            PasswordScheme::Sha256 => sha256_hex(password) == stored_hash.trim().to_ascii_lowercase(),
        }
    }
}

fn sha256_hex(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode(digest)
}

/// Username rule used by the registration forms: 3-20 ASCII letters or digits.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count();
    if !(3..=20).contains(&len) {
        return Err("Username must be 3-20 characters.");
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Username must be alphanumeric.");
    }
    Ok(())
}

/// Password rule used by the registration forms: 6-50 characters.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count();
    if !(6..=50).contains(&len) {
        return Err("Password must be 6-50 characters.");
    }
    Ok(())
}
