//! Import of the pre-database `users.txt` credentials file.
//!
//! Each line is `username,hash`. The hashes are copied as-is, so they must have
//! been produced by the scheme the platform verifies with.

use super::ImportError;
use crate::db::Repository;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub file_found: bool,
    pub lines_read: usize,
    pub imported: usize,
    pub skipped_existing: usize,
}

/// Parse the credentials file contents into `(username, hash)` pairs.
///
/// Each non-blank line is trimmed and split once on its first comma, so the
/// hash keeps any later commas. A line with no comma fails the whole parse.
pub fn parse_legacy_users(contents: &str) -> Result<Vec<(String, String)>, ImportError> {
    let mut users = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (username, hash) = line
            .split_once(',')
            .ok_or(ImportError::MalformedLine {
                line: idx as u64 + 1,
            })?;
        users.push((username.to_string(), hash.to_string()));
    }

    Ok(users)
}

/// Copy users from the legacy file into the `users` table.
///
/// Existing usernames are left alone. The file is parsed completely before
/// anything is written, and all inserts share one transaction, so a malformed
/// line imports nothing.
pub async fn migrate_legacy_users(
    repo: &Repository,
    path: impl AsRef<Path>,
) -> Result<MigrationReport, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "Legacy users file not found, skipping migration");
        return Ok(MigrationReport::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let users = parse_legacy_users(&contents)?;
    let imported = repo.insert_users_if_absent(&users).await?;

    let report = MigrationReport {
        file_found: true,
        lines_read: users.len(),
        imported,
        skipped_existing: users.len() - imported,
    };

    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped_existing,
        "Users migrated from legacy file"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_lines() {
        let contents = "alice,$2b$12$abcdefghijklmnopqrstuv\n\n  bob,5e884898da28  \n";
        let users = parse_legacy_users(contents).unwrap();
        assert_eq!(
            users,
            vec![
                ("alice".to_string(), "$2b$12$abcdefghijklmnopqrstuv".to_string()),
                ("bob".to_string(), "5e884898da28".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_missing_delimiter_fails() {
        let contents = "alice,hash\n\nbroken-line\n";
        match parse_legacy_users(contents) {
            Err(ImportError::MalformedLine { line }) => assert_eq!(line, 3),
            other => panic!("Expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_splits_on_first_comma_only() {
        let users = parse_legacy_users("alice,hash,extra\n").unwrap();
        assert_eq!(users, vec![("alice".to_string(), "hash,extra".to_string())]);
    }

    #[test]
    fn test_parse_quotes_are_literal() {
        let users = parse_legacy_users("\"bob\",\"h\"\n").unwrap();
        assert_eq!(users, vec![("\"bob\"".to_string(), "\"h\"".to_string())]);
    }
}
