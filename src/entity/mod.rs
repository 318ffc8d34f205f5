mod association;
mod habit;
mod tag;

pub use association::HabitTagAssociation;
pub use habit::{EntryDraft, Habit, HabitDraft, HabitEntry, HabitPatch};
pub use tag::{Tag, TagDraft, TagPatch};

/// The kinds of rows the stores own, used to say what was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Habit,
    Tag,
    Association,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Habit => write!(f, "habit"),
            EntityKind::Tag => write!(f, "tag"),
            EntityKind::Association => write!(f, "habit tag"),
        }
    }
}
