//! Process-local note store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::table::NoteTable;
use super::{InsertOutcome, NoteStore, Result};
use crate::ids::{EditId, ViewId};
use crate::note::NoteRecord;

/// Keeps notes in memory. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<NoteTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.table.read().await.len() == 0
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn insert_if_absent(&self, record: NoteRecord) -> Result<InsertOutcome> {
        Ok(self.table.write().await.insert_if_absent(record))
    }

    async fn find_by_view_id(&self, view_id: &ViewId) -> Result<Option<NoteRecord>> {
        Ok(self.table.read().await.by_view(view_id).cloned())
    }

    async fn find_by_edit_id(&self, edit_id: &EditId) -> Result<Option<NoteRecord>> {
        Ok(self.table.read().await.by_edit(edit_id).cloned())
    }

    async fn update_content(
        &self,
        view_id: &ViewId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<NoteRecord>> {
        let mut table = self.table.write().await;
        if table.update_content(view_id, content, now).is_none() {
            return Ok(None);
        }
        Ok(table.by_view(view_id).cloned())
    }
}
