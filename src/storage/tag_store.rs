use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::database::Database;
use super::error::{constraint_violation, require_name, Constraint, StoreError};
use crate::entity::{EntityKind, Tag, TagDraft};
use crate::id;

pub(super) const TAG_COLUMNS: &str = "t.id, t.name, t.color, t.created_at, t.updated_at";

/// Store for tags. Name uniqueness lives in the schema, not here.
#[derive(Debug, Clone)]
pub struct TagStore {
    db: Database,
}

impl TagStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new tag. A name already in use fails with `DuplicateName`.
    pub fn create(&self, draft: TagDraft) -> Result<Tag, StoreError> {
        require_name("tag", &draft.name)?;

        let now = Utc::now();
        let tag = Tag {
            id: id::generate(),
            name: draft.name,
            color: draft.color,
            created_at: now,
            updated_at: now,
        };

        self.db.write(|tx| {
            tx.execute(
                "INSERT INTO tags (id, name, color, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![tag.id, tag.name, tag.color, tag.created_at, tag.updated_at],
            )
            .map_err(|err| duplicate_name_or(err, &tag.name))?;
            Ok(())
        })?;

        Ok(tag)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Tag>, StoreError> {
        self.db.read(|conn| {
            let sql = format!("SELECT {} FROM tags t WHERE t.id = ?1", TAG_COLUMNS);
            let tag = conn.query_row(&sql, [id], tag_from_row).optional()?;
            Ok(tag)
        })
    }

    /// All tags, ordered by name and then id.
    pub fn list(&self) -> Result<Vec<Tag>, StoreError> {
        self.db.read(|conn| {
            let sql = format!("SELECT {} FROM tags t ORDER BY t.name, t.id", TAG_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let tags = stmt
                .query_map([], tag_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(tags)
        })
    }

    /// Replace name and color of an existing tag and return the stored row.
    ///
    /// Renaming onto a name held by another tag fails with `DuplicateName`.
    pub fn update(&self, tag: &Tag) -> Result<Tag, StoreError> {
        require_name("tag", &tag.name)?;

        self.db.write(|tx| {
            let rows = tx
                .execute(
                    "UPDATE tags SET name = ?1, color = ?2, updated_at = ?3 WHERE id = ?4",
                    params![tag.name, tag.color, Utc::now(), tag.id],
                )
                .map_err(|err| duplicate_name_or(err, &tag.name))?;
            if rows == 0 {
                return Err(StoreError::not_found(EntityKind::Tag, tag.id));
            }

            let sql = format!("SELECT {} FROM tags t WHERE t.id = ?1", TAG_COLUMNS);
            Ok(tx.query_row(&sql, [tag.id], tag_from_row)?)
        })
    }

    /// Delete a tag. Its associations go with it; the habits stay.
    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.db.write(|tx| {
            let rows = tx.execute("DELETE FROM tags WHERE id = ?1", [id])?;
            if rows == 0 {
                return Err(StoreError::not_found(EntityKind::Tag, id));
            }
            Ok(())
        })
    }
}

fn duplicate_name_or(err: rusqlite::Error, name: &str) -> StoreError {
    match constraint_violation(&err) {
        Some(Constraint::Unique) => StoreError::DuplicateName(name.to_string()),
        _ => err.into(),
    }
}

pub(super) fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
