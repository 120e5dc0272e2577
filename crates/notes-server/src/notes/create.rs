//! `POST /api/notes`

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use notes_core::CreatedNote;
use serde::Deserialize;
use serde_json::Value;

use super::required_string;
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub content: Option<Value>,
}

/// Creates a note. The response is the only one that includes `editId`.
pub async fn handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedNote>), ApiError> {
    let Json(request) = payload?;
    let content = required_string(request.content, "content")?;

    let note = state.service.create(content).await?;
    Ok((StatusCode::CREATED, Json(note)))
}
