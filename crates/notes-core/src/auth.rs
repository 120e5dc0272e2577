//! Edit capability check.
//!
//! Writes are authorized by possession of an edit identifier. The caller
//! resolves the presented identifier to a record (or nothing) and the check
//! decides whether that record is the resource being written.

use crate::ids::ViewId;
use crate::note::NoteRecord;

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq)]
pub enum Authorization {
    /// Carries the record the presented token resolved to.
    Authorized(NoteRecord),
    Denied,
}

/// Decides whether a presented token grants write access to a resource.
pub trait AuthorizationCheck: Send + Sync {
    /// `presented` is the record the presented token resolved to, if any.
    fn authorize(&self, resource: &ViewId, presented: Option<NoteRecord>) -> Authorization;
}

/// The edit identifier must resolve to a record, and that record must be
/// the note named by the view identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditCapability;

impl AuthorizationCheck for EditCapability {
    fn authorize(&self, resource: &ViewId, presented: Option<NoteRecord>) -> Authorization {
        match presented {
            Some(record) if record.view_id == *resource => Authorization::Authorized(record),
            _ => Authorization::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::EditId;
    use chrono::Utc;

    fn record(view: &str, edit: &str) -> NoteRecord {
        NoteRecord::new(
            ViewId::new(view),
            EditId::new(edit),
            String::new(),
            Utc::now(),
        )
    }

    #[test]
    fn test_matching_pair_is_authorized() {
        let note = record("view-a", "edit-a");
        let outcome = EditCapability.authorize(&ViewId::new("view-a"), Some(note.clone()));
        assert_eq!(outcome, Authorization::Authorized(note));
    }

    #[test]
    fn test_unknown_token_is_denied() {
        let outcome = EditCapability.authorize(&ViewId::new("view-a"), None);
        assert_eq!(outcome, Authorization::Denied);
    }

    #[test]
    fn test_token_of_another_note_is_denied() {
        let other = record("view-b", "edit-b");
        let outcome = EditCapability.authorize(&ViewId::new("view-a"), Some(other));
        assert_eq!(outcome, Authorization::Denied);
    }
}
