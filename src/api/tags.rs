use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use super::error::ApiError;
use super::extract::{JsonBody, PathParams};
use super::{blocking, AppState};
use crate::entity::{TagDraft, TagPatch};
use crate::workflow;

pub async fn create_tag(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<TagDraft>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let store = state.tags;
    let tag = blocking(move || store.create(draft)).await?;
    tracing::info!(tag_id = %tag.id, name = %tag.name, "tag created");
    Ok((StatusCode::CREATED, Json(json!({ "tag": tag }))))
}

pub async fn get_tag(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let store = state.tags;
    let tag = blocking(move || workflow::require_tag(&store, id)).await?;
    Ok(Json(json!({ "tag": tag })))
}

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let store = state.tags;
    let tags = blocking(move || store.list()).await?;
    Ok(Json(json!({ "tags": tags })))
}

pub async fn update_tag(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
    JsonBody(patch): JsonBody<TagPatch>,
) -> Result<Json<Value>, ApiError> {
    let store = state.tags;
    let tag = blocking(move || workflow::update_tag(&store, id, patch)).await?;
    tracing::info!(tag_id = %tag.id, "tag updated");
    Ok(Json(json!({ "tag": tag })))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let store = state.tags;
    blocking(move || store.delete(id)).await?;
    tracing::info!(tag_id = %id, "tag deleted");
    Ok(Json(json!({ "message": "tag deleted successfully" })))
}

/// Habits carrying the tag. An unknown tag yields an empty list.
pub async fn habits_for_tag(
    State(state): State<AppState>,
    PathParams(id): PathParams<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let store = state.habits;
    let habits = blocking(move || store.habits_by_tag(id)).await?;
    Ok(Json(json!({ "habits": habits })))
}
