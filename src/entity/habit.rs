// src/entity/habit.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_frequency() -> String {
    "daily".to_string()
}

fn default_target_count() -> u32 {
    1
}

fn default_active() -> bool {
    true
}

/// A recurring activity with a cadence and a target number of completions per period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Cadence label such as "daily" or "weekly". Not checked against a fixed set.
    pub frequency: String,
    pub target_count: u32,
    /// Inactive habits cannot be completed through the complete workflow.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new habit. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default = "default_target_count")]
    pub target_count: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            frequency: default_frequency(),
            target_count: default_target_count(),
            is_active: default_active(),
        }
    }
}

/// Sparse update payload for a habit.
///
/// Only supplied fields overwrite. The patch is merged into the current record by the
/// caller, and the merged record is what gets handed to `HabitStore::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub target_count: Option<u32>,
    pub is_active: Option<bool>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.target_count.is_none()
            && self.is_active.is_none()
    }

    /// Merge the supplied fields into `habit`.
    pub fn apply(self, habit: &mut Habit) {
        if let Some(name) = self.name {
            habit.name = name;
        }
        if let Some(description) = self.description {
            habit.description = description;
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(target_count) = self.target_count {
            habit.target_count = target_count;
        }
        if let Some(is_active) = self.is_active {
            habit.is_active = is_active;
        }
    }
}

/// One completion of a habit. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Caller-supplied fields for a completion entry. The completion time is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub habit_id: Uuid,
    #[serde(default)]
    pub note: Option<String>,
}

impl EntryDraft {
    pub fn new(habit_id: Uuid) -> Self {
        Self {
            habit_id,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_habit() -> Habit {
        let now = Utc::now();
        Habit {
            id: Uuid::new_v4(),
            name: "Read".to_string(),
            description: "Twenty pages".to_string(),
            frequency: "daily".to_string(),
            target_count: 1,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_draft_defaults_from_json() {
        let draft: HabitDraft = serde_json::from_str(r#"{"name": "Stretch"}"#).unwrap();
        assert_eq!(draft, HabitDraft::new("Stretch"));
        assert_eq!(draft.frequency, "daily");
        assert_eq!(draft.target_count, 1);
        assert!(draft.is_active);
    }

    #[test]
    fn test_draft_rejects_negative_target() {
        let result: Result<HabitDraft, _> =
            serde_json::from_str(r#"{"name": "Run", "target_count": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_only_overwrites_supplied_fields() {
        let mut habit = sample_habit();
        let original = habit.clone();

        let patch = HabitPatch {
            target_count: Some(3),
            is_active: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply(&mut habit);

        assert_eq!(habit.target_count, 3);
        assert!(!habit.is_active);
        assert_eq!(habit.name, original.name);
        assert_eq!(habit.description, original.description);
        assert_eq!(habit.frequency, original.frequency);
        assert_eq!(habit.id, original.id);
    }

    #[test]
    fn test_empty_patch_is_a_no_op() {
        let mut habit = sample_habit();
        let original = habit.clone();
        let patch: HabitPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
        patch.apply(&mut habit);
        assert_eq!(habit, original);
    }
}
