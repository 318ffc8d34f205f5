//! Habit/tag association edges. Part of the habit store's contract.

use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use super::database::row_exists;
use super::error::{constraint_violation, Constraint, StoreError};
use super::habit_store::{habit_from_row, HabitStore, HABIT_COLUMNS};
use super::tag_store::{tag_from_row, TAG_COLUMNS};
use crate::entity::{EntityKind, Habit, HabitTagAssociation, Tag};
use crate::id;

impl HabitStore {
    /// Attach a tag to a habit.
    ///
    /// Both ends must exist. Attaching a pair that is already attached fails with
    /// `AlreadyAttached` rather than creating a second edge.
    pub fn attach(&self, habit_id: Uuid, tag_id: Uuid) -> Result<HabitTagAssociation, StoreError> {
        let association = HabitTagAssociation {
            id: id::generate(),
            habit_id,
            tag_id,
            created_at: Utc::now(),
        };

        self.db.write(|tx| {
            if !row_exists(tx, "habits", habit_id)? {
                return Err(StoreError::not_found(EntityKind::Habit, habit_id));
            }
            if !row_exists(tx, "tags", tag_id)? {
                return Err(StoreError::not_found(EntityKind::Tag, tag_id));
            }

            tx.execute(
                "INSERT INTO habit_tag_associations (id, habit_id, tag_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    association.id,
                    association.habit_id,
                    association.tag_id,
                    association.created_at,
                ],
            )
            .map_err(|err| match constraint_violation(&err) {
                Some(Constraint::Unique) => StoreError::AlreadyAttached { habit_id, tag_id },
                _ => err.into(),
            })?;
            Ok(())
        })?;

        Ok(association)
    }

    /// Remove the edge between a habit and a tag. `NotFound` if they were not attached.
    pub fn detach(&self, habit_id: Uuid, tag_id: Uuid) -> Result<(), StoreError> {
        self.db.write(|tx| {
            let rows = tx.execute(
                "DELETE FROM habit_tag_associations WHERE habit_id = ?1 AND tag_id = ?2",
                params![habit_id, tag_id],
            )?;
            if rows == 0 {
                return Err(StoreError::not_found(EntityKind::Association, tag_id));
            }
            Ok(())
        })
    }

    /// Habits carrying `tag_id`, ordered by name and then id.
    ///
    /// An unknown tag yields an empty list, same as a tag with no habits.
    pub fn habits_by_tag(&self, tag_id: Uuid) -> Result<Vec<Habit>, StoreError> {
        self.db.read(|conn| {
            let sql = format!(
                "SELECT {}
                 FROM habits h
                 JOIN habit_tag_associations a ON a.habit_id = h.id
                 WHERE a.tag_id = ?1
                 ORDER BY h.name, h.id",
                HABIT_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let habits = stmt
                .query_map([tag_id], habit_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(habits)
        })
    }

    /// Tags attached to `habit_id`, ordered by name and then id.
    pub fn tags_for_habit(&self, habit_id: Uuid) -> Result<Vec<Tag>, StoreError> {
        self.db.read(|conn| {
            let sql = format!(
                "SELECT {}
                 FROM tags t
                 JOIN habit_tag_associations a ON a.tag_id = t.id
                 WHERE a.habit_id = ?1
                 ORDER BY t.name, t.id",
                TAG_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let tags = stmt
                .query_map([habit_id], tag_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(tags)
        })
    }
}
