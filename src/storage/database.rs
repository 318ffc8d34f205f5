use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use uuid::Uuid;

use super::StoreError;
use crate::config::DatabaseConfig;

/// Embedded schema migrations, applied in order and recorded in `schema_migrations`.
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        1,
        "create_habits",
        include_str!("../../migrations/0001_create_habits.sql"),
    ),
    (
        2,
        "create_tags",
        include_str!("../../migrations/0002_create_tags.sql"),
    ),
    (
        3,
        "create_habit_tag_associations",
        include_str!("../../migrations/0003_create_habit_tag_associations.sql"),
    ),
];

/// Handle to the backing SQLite database, shared by the stores.
///
/// The handle holds no connection. Every operation opens its own, so stores carry no
/// in-process mutable state and concurrent callers only meet inside SQLite.
#[derive(Debug, Clone)]
pub struct Database {
    path: Arc<PathBuf>,
    busy_timeout: Duration,
}

impl Database {
    /// Open (creating if needed) the database file and bring its schema up to date.
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let db = Self {
            path: Arc::new(config.path.clone()),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
        };

        let mut conn = db.connect()?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        migrate(&mut conn)?;

        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection with foreign keys enforced and the busy timeout applied.
    pub fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(self.path.as_path())?;
        conn.busy_timeout(self.busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Highest applied migration version.
    pub fn schema_version(&self) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        let version: Option<i64> =
            conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })?;
        Ok(version.unwrap_or(0))
    }

    /// Run `f` against a connection outside any explicit transaction.
    pub(crate) fn read<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Run `f` inside an immediate transaction.
    ///
    /// The transaction commits only when `f` returns `Ok`. Any error, including a
    /// not-found detected after a statement ran, drops it and rolls everything back.
    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&Transaction<'_>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

fn migrate(conn: &mut Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )?;

    for (version, name, sql) in MIGRATIONS {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let applied: Option<i64> = tx
            .query_row(
                "SELECT version FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .optional()?;

        if applied.is_none() {
            tx.execute_batch(sql)?;
            tx.execute(
                "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
                params![version, name, Utc::now()],
            )?;
        }
        tx.commit()?;
    }

    Ok(())
}

/// Whether a row with `id` exists in `table`.
pub(crate) fn row_exists(
    conn: &Connection,
    table: &'static str,
    id: Uuid,
) -> Result<bool, StoreError> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table);
    let exists: bool = conn.query_row(&sql, [id], |row| row.get(0))?;
    Ok(exists)
}
