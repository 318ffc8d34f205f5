//! HTTP adapter over the stores.
//!
//! Handlers decode requests, move the blocking store call onto tokio's blocking pool,
//! and wrap results in a JSON envelope.

pub mod error;
mod extract;
mod habits;
mod tags;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Result;
use crate::storage::{Database, HabitStore, TagStore};
use error::ApiError;

/// Stores shared by all handlers. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub habits: HabitStore,
    pub tags: TagStore,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            habits: HabitStore::new(db.clone()),
            tags: TagStore::new(db),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/habits", get(habits::list_habits).post(habits::create_habit))
        .route(
            "/habits/{id}",
            get(habits::get_habit)
                .patch(habits::update_habit)
                .delete(habits::delete_habit),
        )
        .route(
            "/habits/{id}/entries",
            get(habits::list_entries).post(habits::log_completion),
        )
        .route("/habits/{id}/complete", post(habits::complete_habit))
        .route(
            "/habits/{id}/tags",
            get(habits::list_habit_tags).post(habits::attach_tag),
        )
        .route("/habits/{id}/tags/{tag_id}", delete(habits::detach_tag))
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/tags/{id}",
            get(tags::get_tag)
                .patch(tags::update_tag)
                .delete(tags::delete_tag),
        )
        .route("/tags/{id}/habits", get(tags::habits_for_tag))
        .with_state(state)
}

async fn health() -> &'static str {
    "Status is available\n"
}

/// Run a blocking store call off the async runtime.
async fn blocking<T, E, F>(f: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce() -> std::result::Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?
        .map_err(Into::into)
}

/// Open the database and serve HTTP until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    let db = Database::open(&config.database)?;
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, database = %db.path().display(), "habitual listening");

    axum::serve(listener, router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("habitual stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
