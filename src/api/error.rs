//! HTTP error type and the mapping from store/application failures to status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::HabitualError;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::DuplicateName(_) | StoreError::AlreadyAttached { .. } => {
                ApiError::Conflict(err.to_string())
            }
            StoreError::InvalidInput(msg) => ApiError::BadRequest(msg),
            StoreError::Persistence(_) | StoreError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<HabitualError> for ApiError {
    fn from(err: HabitualError) -> Self {
        match err {
            HabitualError::Store(e) => e.into(),
            HabitualError::EntityNotFound(_) => ApiError::NotFound(err.to_string()),
            HabitualError::InactiveHabit(_) | HabitualError::AmbiguousId(_) => {
                ApiError::BadRequest(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
