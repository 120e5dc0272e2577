//! In-memory indexes shared by the store backends.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InsertOutcome, Result, StoreError};
use crate::ids::{EditId, ViewId};
use crate::note::NoteRecord;

/// On-disk shape of the note collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct PersistedNotes {
    pub notes: Vec<NoteRecord>,
}

/// Notes keyed by view identifier, plus an edit identifier index.
#[derive(Debug, Default)]
pub(crate) struct NoteTable {
    /// view id -> record
    notes: HashMap<String, NoteRecord>,
    /// edit id -> view id
    edit_index: HashMap<String, String>,
}

impl NoteTable {
    /// Rebuild the indexes from persisted records, rejecting duplicates.
    pub fn from_persisted(persisted: PersistedNotes) -> Result<Self> {
        let mut table = Self::default();
        for record in persisted.notes {
            let view_id = record.view_id.as_str().to_string();
            if table.insert_if_absent(record) == InsertOutcome::Conflict {
                return Err(StoreError::Corrupt(format!(
                    "duplicate identifier on note {}",
                    view_id
                )));
            }
        }
        Ok(table)
    }

    pub fn to_persisted(&self) -> PersistedNotes {
        let mut notes: Vec<NoteRecord> = self.notes.values().cloned().collect();
        notes.sort_by_key(|n| n.created_at);
        PersistedNotes { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether `id` is in use as either a view or an edit identifier.
    fn is_taken(&self, id: &str) -> bool {
        self.notes.contains_key(id) || self.edit_index.contains_key(id)
    }

    pub fn insert_if_absent(&mut self, record: NoteRecord) -> InsertOutcome {
        let view_id = record.view_id.as_str();
        let edit_id = record.edit_id.as_str();

        if view_id == edit_id || self.is_taken(view_id) || self.is_taken(edit_id) {
            return InsertOutcome::Conflict;
        }

        self.edit_index
            .insert(edit_id.to_string(), view_id.to_string());
        self.notes.insert(view_id.to_string(), record);
        InsertOutcome::Inserted
    }

    /// Undo an insert. Used when persisting the insert failed.
    pub fn remove(&mut self, view_id: &ViewId) {
        if let Some(record) = self.notes.remove(view_id.as_str()) {
            self.edit_index.remove(record.edit_id.as_str());
        }
    }

    pub fn by_view(&self, view_id: &ViewId) -> Option<&NoteRecord> {
        self.notes.get(view_id.as_str())
    }

    pub fn by_edit(&self, edit_id: &EditId) -> Option<&NoteRecord> {
        self.edit_index
            .get(edit_id.as_str())
            .and_then(|view_id| self.notes.get(view_id))
    }

    /// Set content and advance `updated_at`, returning the record as it was
    /// before.
    pub fn update_content(
        &mut self,
        view_id: &ViewId,
        content: &str,
        now: DateTime<Utc>,
    ) -> Option<NoteRecord> {
        let record = self.notes.get_mut(view_id.as_str())?;
        let previous = record.clone();
        record.content = content.to_string();
        record.updated_at = next_updated_at(previous.updated_at, now);
        Some(previous)
    }

    /// Put a record back as it was. Used to roll back a failed update.
    pub fn restore(&mut self, previous: NoteRecord) {
        self.notes
            .insert(previous.view_id.as_str().to_string(), previous);
    }
}

/// `updated_at` must move forward even when the clock has not.
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(view: &str, edit: &str) -> NoteRecord {
        NoteRecord::new(
            ViewId::new(view),
            EditId::new(edit),
            "content".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_insert_and_lookup_by_both_keys() {
        let mut table = NoteTable::default();
        assert_eq!(table.insert_if_absent(record("v1", "e1")), InsertOutcome::Inserted);

        assert!(table.by_view(&ViewId::new("v1")).is_some());
        assert_eq!(
            table.by_edit(&EditId::new("e1")).map(|r| r.view_id.as_str()),
            Some("v1")
        );
        assert!(table.by_view(&ViewId::new("e1")).is_none());
        assert!(table.by_edit(&EditId::new("v1")).is_none());
    }

    #[test]
    fn test_conflicts_within_and_across_kinds() {
        let mut table = NoteTable::default();
        table.insert_if_absent(record("v1", "e1"));

        // Same kind
        assert_eq!(table.insert_if_absent(record("v1", "e2")), InsertOutcome::Conflict);
        assert_eq!(table.insert_if_absent(record("v2", "e1")), InsertOutcome::Conflict);
        // Across kinds
        assert_eq!(table.insert_if_absent(record("e1", "e3")), InsertOutcome::Conflict);
        assert_eq!(table.insert_if_absent(record("v3", "v1")), InsertOutcome::Conflict);
        // Within one record
        assert_eq!(table.insert_if_absent(record("x", "x")), InsertOutcome::Conflict);

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_clears_both_indexes() {
        let mut table = NoteTable::default();
        table.insert_if_absent(record("v1", "e1"));
        table.remove(&ViewId::new("v1"));

        assert_eq!(table.len(), 0);
        assert!(table.by_edit(&EditId::new("e1")).is_none());
        assert_eq!(table.insert_if_absent(record("v2", "e1")), InsertOutcome::Inserted);
    }

    #[test]
    fn test_update_and_restore() {
        let mut table = NoteTable::default();
        table.insert_if_absent(record("v1", "e1"));
        let view_id = ViewId::new("v1");

        let previous = table
            .update_content(&view_id, "changed", Utc::now())
            .unwrap();
        assert_eq!(table.by_view(&view_id).unwrap().content, "changed");

        table.restore(previous);
        assert_eq!(table.by_view(&view_id).unwrap().content, "content");
        assert!(table.update_content(&ViewId::new("missing"), "x", Utc::now()).is_none());
    }

    #[test]
    fn test_from_persisted_rejects_duplicates() {
        let persisted = PersistedNotes {
            notes: vec![record("v1", "e1"), record("v2", "v1")],
        };
        assert!(matches!(
            NoteTable::from_persisted(persisted),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_stale_clock_still_advances_updated_at() {
        let mut table = NoteTable::default();
        table.insert_if_absent(record("v1", "e1"));
        let view_id = ViewId::new("v1");
        let stored = table.by_view(&view_id).unwrap().updated_at;

        let later = stored + chrono::Duration::seconds(10);
        table.update_content(&view_id, "first", later);
        assert_eq!(table.by_view(&view_id).unwrap().updated_at, later);

        // An update that read the clock before the previous one committed
        table.update_content(&view_id, "second", stored);
        let after = table.by_view(&view_id).unwrap().updated_at;
        assert_eq!(after, later + chrono::Duration::milliseconds(1));
    }

    #[test]
    fn test_next_updated_at_moves_forward() {
        let t = Utc::now();
        let one_second = chrono::Duration::seconds(1);
        assert_eq!(next_updated_at(t, t + one_second), t + one_second);
        assert!(next_updated_at(t, t) > t);
        assert!(next_updated_at(t, t - one_second) > t);
    }
}
