//! `PUT /api/notes/{view_id}`
//!
//! The body carries the edit identifier. It is never echoed back: the
//! response uses the same shape as a fetch.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use notes_core::{EditId, NoteError, NoteView, ViewId};
use serde::Deserialize;
use serde_json::Value;

use super::required_string;
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default)]
    pub edit_id: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
}

pub async fn handler(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<String>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<NoteView>, ApiError> {
    let Json(request) = payload?;
    let content = required_string(request.content, "content")?;
    let edit_id = required_string(request.edit_id, "editId")?;
    if edit_id.is_empty() {
        return Err(NoteError::InvalidInput("editId must not be empty".to_string()).into());
    }

    let note = state
        .service
        .update(&ViewId::new(view_id), &EditId::new(edit_id), &content)
        .await?;
    Ok(Json(note))
}
