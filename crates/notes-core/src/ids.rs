//! View and edit identifiers.
//!
//! Both kinds are random byte strings encoded as unpadded base64url. They
//! differ in length so an edit identifier is recognizable at a glance:
//! view identifiers carry 128 bits (22 chars), edit identifiers 256 bits
//! (43 chars).

use std::fmt::{self, Debug, Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Random bytes in a view identifier.
pub const VIEW_ID_BYTES: usize = 16;
/// Random bytes in an edit identifier.
pub const EDIT_ID_BYTES: usize = 32;

/// Encoded length of a view identifier.
pub const VIEW_ID_LEN: usize = 22;
/// Encoded length of an edit identifier.
pub const EDIT_ID_LEN: usize = 43;

/// Public identifier of a note. Grants read access only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ViewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secret identifier of a note. Presenting it is what authorizes a write.
///
/// `Debug` is redacted and there is no `Display`, so the value only leaves
/// the process through serialization of a create response.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditId(String);

impl EditId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for EditId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("EditId(<redacted>)")
    }
}

/// Source of fresh identifiers.
///
/// The generator makes no uniqueness promise against the store. Callers
/// must insert with insert-if-absent and regenerate on conflict.
pub trait IdGenerator: Send + Sync {
    fn new_view_id(&self) -> ViewId;
    fn new_edit_id(&self) -> EditId;
}

/// Generates identifiers from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn new_view_id(&self) -> ViewId {
        let bytes: [u8; VIEW_ID_BYTES] = rand::rng().random();
        ViewId(URL_SAFE_NO_PAD.encode(bytes))
    }

    fn new_edit_id(&self) -> EditId {
        let bytes: [u8; EDIT_ID_BYTES] = rand::rng().random();
        EditId(URL_SAFE_NO_PAD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_base64url(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[test]
    fn test_view_id_shape() {
        let id = RandomIdGenerator.new_view_id();
        assert_eq!(id.as_str().len(), VIEW_ID_LEN);
        assert!(is_base64url(id.as_str()));
    }

    #[test]
    fn test_edit_id_shape() {
        let id = RandomIdGenerator.new_edit_id();
        assert_eq!(id.as_str().len(), EDIT_ID_LEN);
        assert!(is_base64url(id.as_str()));
    }

    #[test]
    fn test_kinds_are_distinguishable_by_length() {
        assert_ne!(VIEW_ID_LEN, EDIT_ID_LEN);
    }

    #[test]
    fn test_no_repeats_across_both_kinds() {
        let generator = RandomIdGenerator;
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generator.new_view_id().as_str().to_string()));
            assert!(seen.insert(generator.new_edit_id().as_str().to_string()));
        }
    }

    #[test]
    fn test_edit_id_debug_is_redacted() {
        let id = EditId::new("super-secret");
        let debug = format!("{:?}", id);
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, "EditId(<redacted>)");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let view = ViewId::new("abc");
        let edit = EditId::new("xyz");
        assert_eq!(serde_json::to_string(&view).unwrap(), "\"abc\"");
        assert_eq!(serde_json::to_string(&edit).unwrap(), "\"xyz\"");
    }
}
