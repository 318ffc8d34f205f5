//! Transactional persistence for habits, completion entries, tags and their associations.

mod associations;
mod database;
mod error;
mod habit_store;
mod tag_store;

pub use database::Database;
pub use error::StoreError;
pub use habit_store::HabitStore;
pub use tag_store::TagStore;
