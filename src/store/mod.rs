//! NoteStore trait and result types.

mod json;

pub use json::JsonStore;

use crate::domain::{Note, NoteId, Tag};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested note was not found in the store.
    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file could not be read or written as JSON.
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// An uploaded file was rejected.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// A record produced by a store operation was invalid.
    #[error("invalid note record: {0}")]
    InvalidRecord(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Fields for creating a note.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<Tag>,
    pub parent: Option<NoteId>,
}

impl NewNote {
    /// Creates a NewNote with the given title and everything else empty.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Fields for updating a note. `None` leaves the field unchanged.
///
/// `parent` is doubly optional: `None` keeps the current parent,
/// `Some(None)` clears it, `Some(Some(id))` re-parents.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub parent: Option<Option<NoteId>>,
}

/// A resolved backlink: enough to render a clickable badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacklinkRef {
    pub id: NoteId,
    pub title: String,
}

/// A note together with its resolved backlink details.
#[derive(Debug, Clone, Serialize)]
pub struct NoteDetail {
    pub note: Note,
    pub backlinks: Vec<BacklinkRef>,
}

/// One search result, ranked by the store.
///
/// The model performs no re-ranking; results are displayed in store order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: NoteId,
    pub title: String,
    pub preview: String,
}

/// The markdown snippet an upload returns, opaque to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSnippet {
    pub markdown: String,
    pub url: String,
}

/// The remote note store contract the client depends on.
///
/// Implementations own persistence and backlink maintenance. Any failure
/// must leave the store unchanged so the caller's in-memory state never
/// diverges on error.
pub trait NoteStore {
    /// Returns all notes in insertion order.
    fn list_notes(&self) -> StoreResult<Vec<Note>>;

    /// Retrieves a single note with resolved backlink details.
    fn get_note(&self, id: &NoteId) -> StoreResult<NoteDetail>;

    /// Creates a note, assigning it a fresh id.
    fn create_note(&mut self, new: NewNote) -> StoreResult<Note>;

    /// Updates a note's fields and re-derives its outbound links.
    fn update_note(&mut self, id: &NoteId, update: NoteUpdate) -> StoreResult<Note>;

    /// Deletes a note (and its entries in other notes' backlink lists).
    fn delete_note(&mut self, id: &NoteId) -> StoreResult<()>;

    /// Searches titles, content, and tags; returns ranked hits with previews.
    fn search(&self, query: &str) -> StoreResult<Vec<SearchHit>>;

    /// Stores an uploaded file and returns a markdown snippet referencing it.
    fn upload(&mut self, filename: &str, bytes: &[u8]) -> StoreResult<UploadSnippet>;
}
