//! Caller-side policies shared by the HTTP and CLI adapters.
//!
//! The stores take complete records and apply no business rules. Merging sparse updates
//! and gating completions on `is_active` happen here.

use uuid::Uuid;

use crate::entity::{EntityKind, EntryDraft, Habit, HabitEntry, HabitPatch, Tag, TagPatch};
use crate::error::{HabitualError, Result};
use crate::storage::{HabitStore, StoreError, TagStore};

/// Fetch a habit, turning absence into `NotFound`.
pub fn require_habit(store: &HabitStore, id: Uuid) -> Result<Habit> {
    store
        .get(id)?
        .ok_or_else(|| StoreError::not_found(EntityKind::Habit, id).into())
}

pub fn require_tag(store: &TagStore, id: Uuid) -> Result<Tag> {
    store
        .get(id)?
        .ok_or_else(|| StoreError::not_found(EntityKind::Tag, id).into())
}

/// Read the current habit, merge `patch` into it, and store the full record.
pub fn update_habit(store: &HabitStore, id: Uuid, patch: HabitPatch) -> Result<Habit> {
    let mut habit = require_habit(store, id)?;
    patch.apply(&mut habit);
    Ok(store.update(&habit)?)
}

pub fn update_tag(store: &TagStore, id: Uuid, patch: TagPatch) -> Result<Tag> {
    let mut tag = require_tag(store, id)?;
    patch.apply(&mut tag);
    Ok(store.update(&tag)?)
}

/// Record a completion for an active habit.
///
/// Unlike `HabitStore::log_completion`, this refuses habits that are inactive.
pub fn complete_habit(store: &HabitStore, id: Uuid, note: Option<String>) -> Result<HabitEntry> {
    let habit = require_habit(store, id)?;
    if !habit.is_active {
        return Err(HabitualError::InactiveHabit(id));
    }
    Ok(store.log_completion(EntryDraft { habit_id: id, note })?)
}
