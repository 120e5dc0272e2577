//! Mapping from service errors to HTTP responses.
//!
//! Response bodies are `{"error": "..."}`. Infrastructure failures get a
//! generic message; the details only go to the log.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_core::NoteError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Note(NoteError),
    BodyTooLarge,
}

impl From<NoteError> for ApiError {
    fn from(e: NoteError) -> Self {
        ApiError::Note(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::BodyTooLarge;
        }
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::Note(NoteError::InvalidInput(
            "Request body must be a JSON object".to_string(),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BodyTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
            ),
            ApiError::Note(e) => match e {
                NoteError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
                NoteError::NotFound => (StatusCode::NOT_FOUND, "Note not found".to_string()),
                NoteError::Unauthorized => {
                    (StatusCode::FORBIDDEN, "Invalid edit token".to_string())
                }
                NoteError::IdentifierExhaustion { .. } => {
                    tracing::error!(kind = e.kind(), "Note creation failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to create note".to_string(),
                    )
                }
                NoteError::Storage(ref inner) => {
                    tracing::error!(kind = e.kind(), "Storage failure: {}", inner);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Storage temporarily unavailable".to_string(),
                    )
                }
            },
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
