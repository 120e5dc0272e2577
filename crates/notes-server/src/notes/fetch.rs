//! `GET /api/notes/{view_id}`

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use notes_core::{NoteView, ViewId};

use crate::AppState;
use crate::error::ApiError;

pub async fn handler(
    State(state): State<Arc<AppState>>,
    Path(view_id): Path<String>,
) -> Result<Json<NoteView>, ApiError> {
    let note = state.service.fetch(&ViewId::new(view_id)).await?;
    Ok(Json(note))
}
