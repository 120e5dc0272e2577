//! notes-core: capability-based anonymous notes.
//!
//! A note is created with two identifiers:
//! - a view identifier, safe to share, that grants read access
//! - an edit identifier, a bearer capability that grants write access
//!
//! This crate provides:
//! - Identifier generation (`ids`)
//! - The note record and its response projections (`note`)
//! - The edit capability check (`auth`)
//! - The `NoteStore` trait with in-memory and JSON file backends (`store`)
//! - `NoteService`, which owns create / fetch / update (`service`)

pub mod auth;
pub mod error;
pub mod ids;
pub mod note;
pub mod service;
pub mod store;

pub use auth::{Authorization, AuthorizationCheck, EditCapability};
pub use error::NoteError;
pub use ids::{EditId, IdGenerator, RandomIdGenerator, ViewId};
pub use note::{CreatedNote, NoteRecord, NoteView};
pub use service::{NoteService, ServiceOptions};
pub use store::{FileStore, InsertOutcome, MemoryStore, NoteStore, StoreError};
