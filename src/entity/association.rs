use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A many-to-many edge between one habit and one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitTagAssociation {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub tag_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl HabitTagAssociation {
    /// Composite key identifying the edge independently of its row id.
    pub fn pair_key(&self) -> String {
        format!("{}:{}", self.habit_id, self.tag_id)
    }
}
