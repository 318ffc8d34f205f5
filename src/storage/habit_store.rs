use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::database::Database;
use super::error::{constraint_violation, require_name, Constraint, StoreError};
use crate::entity::{EntityKind, EntryDraft, Habit, HabitDraft, HabitEntry};
use crate::id;

pub(super) const HABIT_COLUMNS: &str =
    "h.id, h.name, h.description, h.frequency, h.target_count, h.is_active, h.created_at, h.updated_at";

/// Store for habits and their append-only completion log.
///
/// Also owns the habit/tag association edges (see `associations.rs`).
#[derive(Debug, Clone)]
pub struct HabitStore {
    pub(super) db: Database,
}

impl HabitStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new habit with a fresh id and server timestamps.
    pub fn create(&self, draft: HabitDraft) -> Result<Habit, StoreError> {
        require_name("habit", &draft.name)?;

        let now = Utc::now();
        let habit = Habit {
            id: id::generate(),
            name: draft.name,
            description: draft.description,
            frequency: draft.frequency,
            target_count: draft.target_count,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        };

        self.db.write(|tx| {
            tx.execute(
                "INSERT INTO habits
                 (id, name, description, frequency, target_count, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    habit.id,
                    habit.name,
                    habit.description,
                    habit.frequency,
                    habit.target_count,
                    habit.is_active,
                    habit.created_at,
                    habit.updated_at,
                ],
            )?;
            Ok(())
        })?;

        Ok(habit)
    }

    /// Look up a habit. `Ok(None)` means no such habit; `Err` means the lookup itself failed.
    pub fn get(&self, id: Uuid) -> Result<Option<Habit>, StoreError> {
        self.db.read(|conn| {
            let sql = format!("SELECT {} FROM habits h WHERE h.id = ?1", HABIT_COLUMNS);
            let habit = conn.query_row(&sql, [id], habit_from_row).optional()?;
            Ok(habit)
        })
    }

    /// All habits, ordered by name and then id.
    pub fn list(&self) -> Result<Vec<Habit>, StoreError> {
        self.db.read(|conn| {
            let sql = format!("SELECT {} FROM habits h ORDER BY h.name, h.id", HABIT_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let habits = stmt
                .query_map([], habit_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(habits)
        })
    }

    /// Replace every mutable field of an existing habit and refresh `updated_at`.
    ///
    /// The caller merges partial changes first (see `HabitPatch`). `id` and `created_at`
    /// of the passed record are not written; the returned habit is the stored row.
    /// Concurrent updates to the same habit are last-writer-wins.
    pub fn update(&self, habit: &Habit) -> Result<Habit, StoreError> {
        require_name("habit", &habit.name)?;

        self.db.write(|tx| {
            let rows = tx.execute(
                "UPDATE habits
                 SET name = ?1, description = ?2, frequency = ?3, target_count = ?4,
                     is_active = ?5, updated_at = ?6
                 WHERE id = ?7",
                params![
                    habit.name,
                    habit.description,
                    habit.frequency,
                    habit.target_count,
                    habit.is_active,
                    Utc::now(),
                    habit.id,
                ],
            )?;
            if rows == 0 {
                return Err(StoreError::not_found(EntityKind::Habit, habit.id));
            }

            let sql = format!("SELECT {} FROM habits h WHERE h.id = ?1", HABIT_COLUMNS);
            Ok(tx.query_row(&sql, [habit.id], habit_from_row)?)
        })
    }

    /// Hard-delete a habit together with its completion entries and tag associations.
    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.db.write(|tx| {
            let rows = tx.execute("DELETE FROM habits WHERE id = ?1", [id])?;
            if rows == 0 {
                return Err(StoreError::not_found(EntityKind::Habit, id));
            }
            Ok(())
        })
    }

    /// Append a completion entry.
    ///
    /// Does not look at `is_active`; gating completions is the caller's policy.
    /// Logging against a habit that does not exist fails with `NotFound`.
    pub fn log_completion(&self, draft: EntryDraft) -> Result<HabitEntry, StoreError> {
        let entry = HabitEntry {
            id: id::generate(),
            habit_id: draft.habit_id,
            completed_at: Utc::now(),
            note: draft.note,
        };

        self.db.write(|tx| {
            tx.execute(
                "INSERT INTO habit_entries (id, habit_id, completed_at, note)
                 VALUES (?1, ?2, ?3, ?4)",
                params![entry.id, entry.habit_id, entry.completed_at, entry.note],
            )
            .map_err(|err| match constraint_violation(&err) {
                Some(Constraint::ForeignKey) => {
                    StoreError::not_found(EntityKind::Habit, entry.habit_id)
                }
                _ => err.into(),
            })?;
            Ok(())
        })?;

        Ok(entry)
    }

    /// Completion entries of a habit, oldest first.
    pub fn entries(&self, habit_id: Uuid) -> Result<Vec<HabitEntry>, StoreError> {
        self.db.read(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, habit_id, completed_at, note
                 FROM habit_entries
                 WHERE habit_id = ?1
                 ORDER BY completed_at, id",
            )?;
            let entries = stmt
                .query_map([habit_id], |row| {
                    Ok(HabitEntry {
                        id: row.get(0)?,
                        habit_id: row.get(1)?,
                        completed_at: row.get(2)?,
                        note: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(entries)
        })
    }
}

pub(super) fn habit_from_row(row: &Row<'_>) -> rusqlite::Result<Habit> {
    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        frequency: row.get(3)?,
        target_count: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
