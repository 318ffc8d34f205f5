use thiserror::Error;
use uuid::Uuid;

use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum HabitualError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Ambiguous id prefix '{0}', use more characters")]
    AmbiguousId(String),

    #[error("Cannot complete an inactive habit: {0}")]
    InactiveHabit(Uuid),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, HabitualError>;
