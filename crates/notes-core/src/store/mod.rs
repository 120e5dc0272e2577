//! Durable note storage.
//!
//! The service only talks to the [`NoteStore`] trait. Two backends ship
//! with the crate:
//! - `MemoryStore` - process-local, for tests and throwaway instances
//! - `FileStore` - JSON file in a data directory, survives restarts
//!
//! Every backend keeps two unique indexes, one on the view identifier and
//! one on the edit identifier, and treats the two as a single namespace:
//! a new identifier conflicts with an existing identifier of either kind.

mod file;
mod memory;
mod table;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ids::{EditId, ViewId};
use crate::note::NoteRecord;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Result of an insert-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// One of the record's identifiers is already in use. Nothing was written.
    Conflict,
}

/// Abstract storage backend for notes.
///
/// Each method is atomic with respect to the record it touches. No method
/// holds a lock across calls.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert `record` unless its view or edit identifier is already taken
    /// by any note, as either kind of identifier.
    async fn insert_if_absent(&self, record: NoteRecord) -> Result<InsertOutcome>;

    async fn find_by_view_id(&self, view_id: &ViewId) -> Result<Option<NoteRecord>>;

    async fn find_by_edit_id(&self, edit_id: &EditId) -> Result<Option<NoteRecord>>;

    /// Replace the content of the note keyed by `view_id`.
    ///
    /// `updated_at` becomes `now`, or 1 ms past the stored value if `now`
    /// is not later than it; the comparison happens inside the same atomic
    /// write. Returns the updated record, or `None` if no note has this
    /// view identifier. Concurrent calls for the same note are
    /// last-writer-wins.
    async fn update_content(
        &self,
        view_id: &ViewId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<NoteRecord>>;
}
