use std::collections::HashMap;
use thiserror::Error;

use crate::auth::{PasswordScheme, MAX_BCRYPT_COST, MIN_BCRYPT_COST};

pub const DEFAULT_DATABASE_PATH: &str = "DATA/intelligence_platform.db";
pub const DEFAULT_LEGACY_USERS_FILE: &str = "DATA/users.txt";
pub const DEFAULT_CSV_DIR: &str = "DATA";
pub const DEFAULT_LLM_API_URL: &str = "http://localhost:11434";
pub const DEFAULT_LLM_MODEL: &str = "phi3:mini";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub legacy_users_file: String,
    pub csv_dir: String,
    pub password_scheme: PasswordScheme,
    pub llm_api_url: String,
    pub llm_model: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            legacy_users_file: DEFAULT_LEGACY_USERS_FILE.to_string(),
            csv_dir: DEFAULT_CSV_DIR.to_string(),
            password_scheme: PasswordScheme::default(),
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| -> String {
            env_map
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        let bcrypt_cost = env_map
            .get("BCRYPT_COST")
            .map(|s| s.as_str())
            .unwrap_or("12")
            .parse::<u32>()
            .ok()
            .filter(|cost| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(cost))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "BCRYPT_COST".to_string(),
                    format!(
                        "must be an integer between {} and {}",
                        MIN_BCRYPT_COST, MAX_BCRYPT_COST
                    ),
                )
            })?;

        let password_scheme = match env_map
            .get("PASSWORD_SCHEME")
            .map(|s| s.as_str())
            .unwrap_or("bcrypt")
        {
            "bcrypt" => PasswordScheme::Bcrypt { cost: bcrypt_cost },
            "sha256" => PasswordScheme::Sha256,
            other => {
                return Err(ConfigError::InvalidValue(
                    "PASSWORD_SCHEME".to_string(),
                    format!("must be bcrypt or sha256, got {}", other),
                ))
            }
        };

        Ok(Config {
            database_path: get_or("DATABASE_PATH", DEFAULT_DATABASE_PATH),
            legacy_users_file: get_or("LEGACY_USERS_FILE", DEFAULT_LEGACY_USERS_FILE),
            csv_dir: get_or("CSV_DIR", DEFAULT_CSV_DIR),
            password_scheme,
            llm_api_url: get_or("LLM_API_URL", DEFAULT_LLM_API_URL),
            llm_model: get_or("LLM_MODEL", DEFAULT_LLM_MODEL),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert_eq!(config.legacy_users_file, DEFAULT_LEGACY_USERS_FILE);
        assert_eq!(config.csv_dir, DEFAULT_CSV_DIR);
        assert_eq!(config.password_scheme, PasswordScheme::Bcrypt { cost: 12 });
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
    }

    #[test]
    fn test_overrides() {
        let mut env_map = HashMap::new();
        env_map.insert("DATABASE_PATH".to_string(), "/tmp/platform.db".to_string());
        env_map.insert("PASSWORD_SCHEME".to_string(), "sha256".to_string());
        env_map.insert("LLM_API_URL".to_string(), "http://127.0.0.1:9999".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.database_path, "/tmp/platform.db");
        assert_eq!(config.password_scheme, PasswordScheme::Sha256);
        assert_eq!(config.llm_api_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let mut env_map = HashMap::new();
        env_map.insert("CSV_DIR".to_string(), "  ".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.csv_dir, DEFAULT_CSV_DIR);
    }

    #[test]
    fn test_invalid_password_scheme() {
        let mut env_map = HashMap::new();
        env_map.insert("PASSWORD_SCHEME".to_string(), "md5".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PASSWORD_SCHEME"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_bcrypt_cost() {
        for bad in ["abc", "2", "40"] {
            let mut env_map = HashMap::new();
            env_map.insert("BCRYPT_COST".to_string(), bad.to_string());
            match Config::from_env_map(env_map) {
                Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BCRYPT_COST"),
                _ => panic!("Expected InvalidValue error for {}", bad),
            }
        }
    }
}
