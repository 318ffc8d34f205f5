use rusqlite::{ffi, ErrorCode};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::EntityKind;

/// Failures surfaced by the stores.
///
/// `NotFound`, `DuplicateName` and `AlreadyAttached` are logical outcomes the caller is
/// expected to branch on. `Persistence` and `Io` are infrastructure failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("A tag named '{0}' already exists")]
    DuplicateName(String),

    #[error("Tag {tag_id} is already attached to habit {habit_id}")]
    AlreadyAttached { habit_id: Uuid, tag_id: Uuid },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: Uuid) -> Self {
        StoreError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// True for infrastructure failures (connection, IO, unexpected constraint, abort).
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence(_) | StoreError::Io(_))
    }
}

/// Which constraint a failed statement tripped, read from SQLite's extended result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
    Check,
}

pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE => Some(Constraint::Unique),
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
                ffi::SQLITE_CONSTRAINT_CHECK => Some(Constraint::Check),
                _ => None,
            }
        }
        _ => None,
    }
}

pub(crate) fn require_name(what: &str, name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!("{} name must not be empty", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_is_classified_structurally() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL UNIQUE)")
            .unwrap();
        conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap();

        let err = conn
            .execute("INSERT INTO t (name) VALUES ('a')", [])
            .unwrap_err();
        assert_eq!(constraint_violation(&err), Some(Constraint::Unique));
    }

    #[test]
    fn test_foreign_key_violation_is_classified() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE p (id INTEGER PRIMARY KEY);
             CREATE TABLE c (p_id INTEGER NOT NULL REFERENCES p(id));",
        )
        .unwrap();

        let err = conn
            .execute("INSERT INTO c (p_id) VALUES (42)", [])
            .unwrap_err();
        assert_eq!(constraint_violation(&err), Some(Constraint::ForeignKey));
    }

    #[test]
    fn test_other_errors_are_not_constraints() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing", []).unwrap_err();
        assert_eq!(constraint_violation(&err), None);
    }

    #[test]
    fn test_require_name() {
        assert!(require_name("habit", "Read").is_ok());
        assert!(matches!(
            require_name("habit", "   "),
            Err(StoreError::InvalidInput(_))
        ));
    }
}
