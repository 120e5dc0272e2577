//! Note access service: create, fetch by view identifier, and authorized
//! update.
//!
//! The service holds no note state of its own. Everything goes through the
//! store handle it is constructed with, and every store call is bounded by
//! `ServiceOptions::store_timeout`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::auth::{Authorization, AuthorizationCheck, EditCapability};
use crate::error::{NoteError, Result};
use crate::ids::{EditId, IdGenerator, RandomIdGenerator, ViewId};
use crate::note::{CreatedNote, NoteRecord, NoteView};
use crate::store::{self, InsertOutcome, NoteStore, StoreError};

/// Tunables for [`NoteService`].
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Total insert attempts on create before giving up on identifier
    /// collisions.
    pub id_attempts: u32,
    /// Upper bound on any single store call.
    pub store_timeout: Duration,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            id_attempts: 3,
            store_timeout: Duration::from_secs(5),
        }
    }
}

pub struct NoteService {
    store: Arc<dyn NoteStore>,
    ids: Arc<dyn IdGenerator>,
    auth: Arc<dyn AuthorizationCheck>,
    options: ServiceOptions,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>, options: ServiceOptions) -> Self {
        Self {
            store,
            ids: Arc::new(RandomIdGenerator),
            auth: Arc::new(EditCapability),
            options,
        }
    }

    /// Replace the identifier generator.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Create a note. The response is the only place the edit identifier
    /// is ever returned.
    pub async fn create(&self, content: impl Into<String>) -> Result<CreatedNote> {
        let content = content.into();
        let attempts = self.options.id_attempts.max(1);

        for attempt in 1..=attempts {
            let view_id = self.ids.new_view_id();
            let edit_id = self.ids.new_edit_id();
            if view_id.as_str() == edit_id.as_str() {
                tracing::warn!(
                    attempt,
                    "Generated view and edit identifiers are equal, regenerating"
                );
                continue;
            }

            let record = NoteRecord::new(view_id, edit_id, content.clone(), Utc::now());
            match self.call(self.store.insert_if_absent(record.clone())).await? {
                InsertOutcome::Inserted => {
                    tracing::info!(view_id = %record.view_id, "Created note");
                    return Ok(record.into());
                }
                InsertOutcome::Conflict => {
                    tracing::warn!(attempt, "Identifier collision on create, regenerating");
                }
            }
        }

        tracing::error!(
            attempts,
            "Gave up creating note after repeated identifier collisions"
        );
        Err(NoteError::IdentifierExhaustion { attempts })
    }

    /// Read a note. No authorization; the edit identifier is never part of
    /// the result.
    pub async fn fetch(&self, view_id: &ViewId) -> Result<NoteView> {
        self.call(self.store.find_by_view_id(view_id))
            .await?
            .map(NoteView::from)
            .ok_or(NoteError::NotFound)
    }

    /// Replace a note's content.
    ///
    /// The edit identifier is looked up first; the note it resolves to must
    /// be the one named by `view_id`. The write itself is keyed by
    /// `view_id`.
    pub async fn update(
        &self,
        view_id: &ViewId,
        edit_id: &EditId,
        content: &str,
    ) -> Result<NoteView> {
        let presented = self.call(self.store.find_by_edit_id(edit_id)).await?;

        match self.auth.authorize(view_id, presented) {
            Authorization::Authorized(_) => {}
            Authorization::Denied => {
                tracing::debug!("Rejected note update: edit token does not match");
                return Err(NoteError::Unauthorized);
            }
        }

        // The store moves updated_at past its current value if the clock lags
        let updated = self
            .call(self.store.update_content(view_id, content, Utc::now()))
            .await?
            .ok_or(NoteError::NotFound)?;

        tracing::info!(view_id = %updated.view_id, "Updated note");
        Ok(updated.into())
    }

    /// Run a store call under the configured timeout.
    async fn call<T>(
        &self,
        fut: impl Future<Output = store::Result<T>>,
    ) -> std::result::Result<T, StoreError> {
        let limit = self.options.store_timeout;
        tokio::time::timeout(limit, fut)
            .await
            .unwrap_or(Err(StoreError::Timeout(limit)))
    }
}
