pub mod api;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod id;
pub mod storage;
pub mod workflow;

pub use config::Config;
pub use error::{HabitualError, Result};
pub use storage::{Database, HabitStore, StoreError, TagStore};
