//! `/api/notes` endpoints

pub mod create;
pub mod fetch;
pub mod update;

use notes_core::NoteError;
use serde_json::Value;

/// Pull a required string field out of a request body.
///
/// Fields are taken as raw JSON values so a missing or mistyped field gets
/// a message naming it instead of a generic deserialization error.
fn required_string(value: Option<Value>, field: &str) -> Result<String, NoteError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(NoteError::InvalidInput(format!(
            "{} is required and must be a string",
            field
        ))),
    }
}
