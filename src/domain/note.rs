//! Note record: the unit of content in the garden.

use crate::domain::{NoteId, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// A note in the garden.
///
/// Notes are flat records: hierarchy comes from the optional `parent` pointer
/// (the full set forms a forest) and associations come from `[[Title]]`
/// wikilinks embedded in the markdown content. The stored `links` list holds
/// the ids the store extracted from the content at last write and may be
/// stale; `backlinks` is maintained entirely by the store.
///
/// The wire format matches the note store's JSON records: `parent_id`,
/// `created_at`, and `updated_at` field names, RFC 3339 timestamps.
///
/// # Required Fields
/// - `id`: unique identifier
/// - `title`: human-readable title (non-empty; the wikilink key, matched
///   case-insensitively and not guaranteed unique)
/// - `created` / `modified`: timestamps
///
/// # Examples
///
/// ```
/// use garden::domain::{Note, NoteId};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let note = Note::new(NoteId::new(), "Compost", now, now).unwrap();
/// assert_eq!(note.title(), "Compost");
/// assert!(note.parent().is_none());
/// ```
#[derive(Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    parent: Option<NoteId>,
    tags: Vec<Tag>,
    links: Vec<NoteId>,
    backlinks: Vec<NoteId>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Note {
    /// Creates a new Note with required fields only.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Result<Self, ParseNoteError> {
        Self::builder(id, title, created, modified).build()
    }

    /// Creates a builder for constructing a Note with optional fields.
    pub fn builder(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder::new(id, title, created, modified)
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's markdown content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the parent note's id, if this note has one.
    pub fn parent(&self) -> Option<&NoteId> {
        self.parent.as_ref()
    }

    /// Returns the note's tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the outbound link targets recorded at last write.
    ///
    /// May be stale relative to the current content; live link derivation
    /// goes through [`crate::model::extract_links`].
    pub fn links(&self) -> &[NoteId] {
        &self.links
    }

    /// Returns the backlink ids supplied by the store.
    pub fn backlinks(&self) -> &[NoteId] {
        &self.backlinks
    }

    /// Returns when the note was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the note was last modified.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Replaces the stored outbound links.
    ///
    /// Called by the store after re-extracting wikilinks from content.
    pub fn set_links(&mut self, links: Vec<NoteId>) {
        self.links = links;
    }

    /// Records `id` as a backlink unless already present.
    ///
    /// Returns true if the backlink was added.
    pub fn add_backlink(&mut self, id: NoteId) -> bool {
        if self.backlinks.contains(&id) {
            false
        } else {
            self.backlinks.push(id);
            true
        }
    }

    /// Removes `id` from the backlink list, if present.
    pub fn remove_backlink(&mut self, id: &NoteId) {
        self.backlinks.retain(|b| b != id);
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("parent", &self.parent)
            .field("tags", &self.tags)
            .field("links", &self.links)
            .field("backlinks", &self.backlinks)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .finish()
    }
}

/// Builder for constructing a Note with optional fields.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    content: String,
    parent: Option<NoteId>,
    tags: Vec<Tag>,
    links: Vec<NoteId>,
    backlinks: Vec<NoteId>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl NoteBuilder {
    fn new(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            parent: None,
            tags: Vec::new(),
            links: Vec::new(),
            backlinks: Vec::new(),
            created,
            modified,
        }
    }

    /// Sets the note's markdown content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the note's parent id.
    pub fn parent(mut self, parent: Option<NoteId>) -> Self {
        self.parent = parent;
        self
    }

    /// Sets the note's tags.
    ///
    /// Duplicates are removed (first occurrence kept).
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        let mut seen = Vec::new();
        for tag in tags {
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }
        self.tags = seen;
        self
    }

    /// Sets the stored outbound links.
    pub fn links(mut self, links: Vec<NoteId>) -> Self {
        self.links = links;
        self
    }

    /// Sets the stored backlinks.
    pub fn backlinks(mut self, backlinks: Vec<NoteId>) -> Self {
        self.backlinks = backlinks;
        self
    }

    /// Builds the Note.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn build(self) -> Result<Note, ParseNoteError> {
        let trimmed = self.title.trim();

        if trimmed.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyTitle,
            });
        }

        Ok(Note {
            id: self.id,
            title: trimmed.to_string(),
            content: self.content,
            parent: self.parent,
            tags: self.tags,
            links: self.links,
            backlinks: self.backlinks,
            created: self.created,
            modified: self.modified,
        })
    }
}

impl Serialize for Note {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("content", &self.content)?;
        map.serialize_entry("parent_id", &self.parent)?;
        map.serialize_entry("tags", &self.tags)?;
        map.serialize_entry("links", &self.links)?;
        map.serialize_entry("backlinks", &self.backlinks)?;
        map.serialize_entry("created_at", &self.created)?;
        map.serialize_entry("updated_at", &self.modified)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct NoteHelper {
            id: NoteId,
            title: String,
            #[serde(default)]
            content: String,
            #[serde(default)]
            parent_id: Option<NoteId>,
            #[serde(default)]
            tags: Vec<Tag>,
            #[serde(default)]
            links: Vec<NoteId>,
            #[serde(default)]
            backlinks: Vec<NoteId>,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
        }

        let helper = NoteHelper::deserialize(deserializer)?;

        Note::builder(helper.id, helper.title, helper.created_at, helper.updated_at)
            .content(helper.content)
            .parent(helper.parent_id)
            .tags(helper.tags)
            .links(helper.links)
            .backlinks(helper.backlinks)
            .build()
            .map_err(serde::de::Error::custom)
    }
}
