//! JSON file note store.
//!
//! All notes live in `notes.json` inside the data directory. The file is
//! loaded once on open and rewritten in full after every mutation, so a
//! write costs O(total notes). Each mutation runs in its own spawned task
//! that holds the write lock until the file is renamed into place (or the
//! change is rolled back), so a caller that stops waiting, for instance on
//! a timeout, never leaves memory and disk disagreeing. Such a caller does
//! not learn whether the write landed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::fs;
use tokio::sync::RwLock;

use super::table::{NoteTable, PersistedNotes};
use super::{InsertOutcome, NoteStore, Result, StoreError};
use crate::ids::{EditId, ViewId};
use crate::note::NoteRecord;

const NOTES_FILE: &str = "notes.json";

/// Filesystem storage backend.
pub struct FileStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    table: RwLock<NoteTable>,
}

impl FileStore {
    /// Open (or create) the store in `data_dir`.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(NOTES_FILE);

        let table = match fs::read_to_string(&path).await {
            Ok(content) => {
                let persisted: PersistedNotes = serde_json::from_str(&content)?;
                let table = NoteTable::from_persisted(persisted)?;
                tracing::info!("Loaded {} notes from {:?}", table.len(), path);
                table
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No notes file at {:?}, starting empty", path);
                NoteTable::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                table: RwLock::new(table),
            }),
        })
    }

    /// Wait for a mutation task. The task keeps running if this future is
    /// dropped.
    async fn run<T: Send + 'static>(
        task: impl Future<Output = Result<T>> + Send + 'static,
    ) -> Result<T> {
        tokio::spawn(task)
            .await
            .map_err(|e| StoreError::Unavailable(format!("store task failed: {}", e)))?
    }
}

impl Inner {
    /// Write the table to disk via temp file + rename.
    async fn persist(&self, table: &NoteTable) -> Result<()> {
        let content = serde_json::to_string(&table.to_persisted())?;
        let suffix: u64 = rand::rng().random();
        let temp_path = self.path.with_extension(format!("{:016x}.tmp", suffix));

        if let Err(e) = fs::write(&temp_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn insert_if_absent(&self, record: NoteRecord) -> Result<InsertOutcome> {
        let mut table = self.table.write().await;
        let view_id = record.view_id.clone();

        if table.insert_if_absent(record) == InsertOutcome::Conflict {
            return Ok(InsertOutcome::Conflict);
        }
        if let Err(e) = self.persist(&table).await {
            table.remove(&view_id);
            return Err(e);
        }
        Ok(InsertOutcome::Inserted)
    }

    async fn update_content(
        &self,
        view_id: &ViewId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<NoteRecord>> {
        let mut table = self.table.write().await;

        let Some(previous) = table.update_content(view_id, content, now) else {
            return Ok(None);
        };
        if let Err(e) = self.persist(&table).await {
            table.restore(previous);
            return Err(e);
        }
        Ok(table.by_view(view_id).cloned())
    }
}

#[async_trait]
impl NoteStore for FileStore {
    async fn insert_if_absent(&self, record: NoteRecord) -> Result<InsertOutcome> {
        let inner = self.inner.clone();
        Self::run(async move { inner.insert_if_absent(record).await }).await
    }

    async fn find_by_view_id(&self, view_id: &ViewId) -> Result<Option<NoteRecord>> {
        Ok(self.inner.table.read().await.by_view(view_id).cloned())
    }

    async fn find_by_edit_id(&self, edit_id: &EditId) -> Result<Option<NoteRecord>> {
        Ok(self.inner.table.read().await.by_edit(edit_id).cloned())
    }

    async fn update_content(
        &self,
        view_id: &ViewId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<NoteRecord>> {
        let inner = self.inner.clone();
        let view_id = view_id.clone();
        let content = content.to_string();
        Self::run(async move { inner.update_content(&view_id, &content, now).await }).await
    }
}
