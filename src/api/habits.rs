use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::error::ApiError;
use super::extract::{JsonBody, PathParams};
use super::{blocking, AppState};
use crate::entity::{EntryDraft, HabitDraft, HabitPatch};
use crate::workflow;

type ApiResult = Result<Json<Value>, ApiError>;
type Created = Result<(StatusCode, Json<Value>), ApiError>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AttachRequest {
    pub tag_id: Uuid,
}

pub async fn create_habit(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<HabitDraft>,
) -> Created {
    let store = state.habits;
    let habit = blocking(move || store.create(draft)).await?;
    tracing::info!(habit_id = %habit.id, name = %habit.name, "habit created");
    Ok((StatusCode::CREATED, Json(json!({ "habit": habit }))))
}

pub async fn get_habit(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult {
    let store = state.habits;
    let habit = blocking(move || workflow::require_habit(&store, id)).await?;
    Ok(Json(json!({ "habit": habit })))
}

pub async fn list_habits(State(state): State<AppState>) -> ApiResult {
    let store = state.habits;
    let habits = blocking(move || store.list()).await?;
    Ok(Json(json!({ "habits": habits })))
}

pub async fn update_habit(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(patch): JsonBody<HabitPatch>,
) -> ApiResult {
    let store = state.habits;
    let habit = blocking(move || workflow::update_habit(&store, id, patch)).await?;
    tracing::info!(habit_id = %habit.id, "habit updated");
    Ok(Json(json!({ "habit": habit })))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult {
    let store = state.habits;
    blocking(move || store.delete(id)).await?;
    tracing::info!(habit_id = %id, "habit deleted");
    Ok(Json(json!({ "message": "habit deleted successfully" })))
}

pub async fn list_entries(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult {
    let store = state.habits;
    let entries = blocking(move || {
        workflow::require_habit(&store, id)?;
        Ok::<_, crate::HabitualError>(store.entries(id)?)
    })
    .await?;
    Ok(Json(json!({ "entries": entries })))
}

/// Append an entry without checking whether the habit is active.
pub async fn log_completion(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(body): JsonBody<NoteRequest>,
) -> Created {
    let store = state.habits;
    let draft = EntryDraft {
        habit_id: id,
        note: body.note,
    };
    let entry = blocking(move || store.log_completion(draft)).await?;
    tracing::info!(habit_id = %id, entry_id = %entry.id, "completion logged");
    Ok((StatusCode::CREATED, Json(json!({ "habitEntry": entry }))))
}

pub async fn complete_habit(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(body): JsonBody<NoteRequest>,
) -> Created {
    let store = state.habits;
    let entry = blocking(move || workflow::complete_habit(&store, id, body.note)).await?;
    tracing::info!(habit_id = %id, entry_id = %entry.id, "habit completed");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "completedHabitEntry": entry,
            "message": "Habit completed successfully",
        })),
    ))
}

pub async fn list_habit_tags(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> ApiResult {
    let store = state.habits;
    let tags = blocking(move || {
        workflow::require_habit(&store, id)?;
        Ok::<_, crate::HabitualError>(store.tags_for_habit(id)?)
    })
    .await?;
    Ok(Json(json!({ "tags": tags })))
}

pub async fn attach_tag(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(body): JsonBody<AttachRequest>,
) -> Created {
    let store = state.habits;
    let association = blocking(move || store.attach(id, body.tag_id)).await?;
    tracing::info!(pair = %association.pair_key(), "tag attached to habit");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "association": association,
            "message": "tag added to habit successfully",
        })),
    ))
}

pub async fn detach_tag(
    State(state): State<AppState>,
    PathParams((id, tag_id)): PathParams<(Uuid, Uuid)>,
) -> ApiResult {
    let store = state.habits;
    blocking(move || store.detach(id, tag_id)).await?;
    tracing::info!(habit_id = %id, tag_id = %tag_id, "tag removed from habit");
    Ok(Json(json!({ "message": "tag removed from habit successfully" })))
}
