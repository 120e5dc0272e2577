//! The note record and the shapes it is returned in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{EditId, ViewId};

/// A stored note, including its edit identifier.
///
/// Never hand this to a reader directly: convert to [`NoteView`] for fetch
/// and update responses, or [`CreatedNote`] for the create response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: Uuid,
    pub view_id: ViewId,
    pub edit_id: EditId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteRecord {
    /// A fresh record with `created_at == updated_at == now`.
    pub fn new(view_id: ViewId, edit_id: EditId, content: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            view_id,
            edit_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create response. The only shape that carries the edit identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedNote {
    pub id: Uuid,
    pub view_id: ViewId,
    pub edit_id: EditId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRecord> for CreatedNote {
    fn from(record: NoteRecord) -> Self {
        Self {
            id: record.id,
            view_id: record.view_id,
            edit_id: record.edit_id,
            content: record.content,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Fetch and update response. Has no edit identifier field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: Uuid,
    pub view_id: ViewId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRecord> for NoteView {
    fn from(record: NoteRecord) -> Self {
        Self {
            id: record.id,
            view_id: record.view_id,
            content: record.content,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
