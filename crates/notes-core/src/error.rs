//! Errors returned by the note service.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum NoteError {
    /// Missing or mistyped field, rejected before the store is touched.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Note not found")]
    NotFound,

    /// The view/edit pair does not resolve to the same note.
    #[error("Invalid edit token")]
    Unauthorized,

    #[error("Could not allocate unique identifiers after {attempts} attempts")]
    IdentifierExhaustion { attempts: u32 },

    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl NoteError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NoteError::InvalidInput(_) => "invalid_input",
            NoteError::NotFound => "not_found",
            NoteError::Unauthorized => "unauthorized",
            NoteError::IdentifierExhaustion { .. } => "identifier_exhaustion",
            NoteError::Storage(_) => "storage_failure",
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;
