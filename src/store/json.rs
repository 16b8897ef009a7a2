//! JSON-file note store.
//!
//! Persists the whole garden as a single JSON document (a `notes` array in
//! insertion order), with uploaded images stored in an `uploads/` directory
//! beside it. Writes are atomic: serialize to a temp file, then rename over
//! the store file, so a failed write never leaves a corrupt garden.

use crate::domain::{Note, NoteId};
use crate::model::extract_links;
use crate::store::{
    BacklinkRef, NewNote, NoteDetail, NoteStore, NoteUpdate, SearchHit, StoreError, StoreResult,
    UploadSnippet,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File extensions accepted by `upload`.
const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Search previews truncate content to this many characters.
const PREVIEW_LENGTH: usize = 100;

/// Title given to notes created without one.
const UNTITLED: &str = "Untitled";

#[derive(Default, Deserialize)]
struct GardenFile {
    #[serde(default)]
    notes: Vec<Note>,
}

#[derive(Serialize)]
struct GardenFileRef<'a> {
    notes: &'a [Note],
}

/// A note store backed by a single JSON file.
///
/// Mutations operate on a working copy of the note list and commit it to
/// memory only after the file write succeeds, so any failure leaves both the
/// file and the in-memory state untouched.
pub struct JsonStore {
    path: PathBuf,
    uploads_dir: PathBuf,
    notes: Vec<Note>,
}

impl JsonStore {
    /// Opens the store at `path`, creating an empty one if the file does not
    /// exist yet. Uploads land in an `uploads/` directory beside the file.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let uploads_dir = parent_dir(&path).join("uploads");

        let notes = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| StoreError::Io {
                path: path.clone(),
                source: e,
            })?;
            let file: GardenFile = serde_json::from_str(&contents)?;
            file.notes
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            uploads_dir,
            notes,
        })
    }

    /// Returns the path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, notes: &[Note]) -> StoreResult<()> {
        let dir = parent_dir(&self.path);
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::Io {
            path: dir.clone(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(&GardenFileRef { notes })?;
        tmp.write_all(json.as_bytes()).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn index_of(notes: &[Note], id: &NoteId) -> Option<usize> {
    notes.iter().position(|n| n.id() == id)
}

fn index_of_title(notes: &[Note], title: &str) -> Option<usize> {
    let needle = title.to_lowercase();
    notes.iter().position(|n| n.title().to_lowercase() == needle)
}

/// Re-extracts wikilinks from `content` and maintains backlinks on the
/// targets: each referenced title is resolved (case-insensitive, first match)
/// or materialized as a stub note, and `source` is recorded in the target's
/// backlink list. Returns the target ids in occurrence order, duplicates
/// preserved.
fn update_links(notes: &mut Vec<Note>, source: &NoteId, content: &str) -> Vec<NoteId> {
    let mut linked = Vec::new();

    for title in extract_links(content) {
        let idx = match index_of_title(notes, title) {
            Some(idx) => idx,
            None => {
                let now = Utc::now();
                // Whitespace-only titles cannot become stubs; the reference
                // stays unresolved.
                match Note::new(NoteId::new(), title, now, now) {
                    Ok(stub) => {
                        notes.push(stub);
                        notes.len() - 1
                    }
                    Err(_) => continue,
                }
            }
        };

        linked.push(notes[idx].id().clone());
        notes[idx].add_backlink(source.clone());
    }

    linked
}

/// Drops `source` from the backlink lists of its previously recorded targets.
fn remove_links(notes: &mut [Note], source: &NoteId) {
    let old_targets = match index_of(notes, source) {
        Some(idx) => notes[idx].links().to_vec(),
        None => return,
    };
    for target in old_targets {
        if let Some(idx) = index_of(notes, &target) {
            notes[idx].remove_backlink(source);
        }
    }
}

fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c == ' ' {
                Some('_')
            } else {
                None
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

fn preview_of(content: &str) -> String {
    if content.chars().count() > PREVIEW_LENGTH {
        let truncated: String = content.chars().take(PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}

impl NoteStore for JsonStore {
    fn list_notes(&self) -> StoreResult<Vec<Note>> {
        Ok(self.notes.clone())
    }

    fn get_note(&self, id: &NoteId) -> StoreResult<NoteDetail> {
        let note = self
            .notes
            .iter()
            .find(|n| n.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::NoteNotFound { id: id.to_string() })?;

        // Dangling backlink ids are skipped rather than surfaced.
        let backlinks = note
            .backlinks()
            .iter()
            .filter_map(|bid| {
                self.notes.iter().find(|n| n.id() == bid).map(|n| BacklinkRef {
                    id: n.id().clone(),
                    title: n.title().to_string(),
                })
            })
            .collect();

        Ok(NoteDetail { note, backlinks })
    }

    fn create_note(&mut self, new: NewNote) -> StoreResult<Note> {
        let mut notes = self.notes.clone();

        let title = if new.title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            new.title
        };
        let id = NoteId::new();
        let now = Utc::now();

        // Link targets are resolved (and stubs created) before the note
        // itself is inserted, matching the store's historical record order.
        let links = update_links(&mut notes, &id, &new.content);

        let mut note = Note::builder(id, title, now, now)
            .content(new.content)
            .parent(new.parent)
            .tags(new.tags)
            .build()
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
        note.set_links(links);

        notes.push(note.clone());
        self.write_file(&notes)?;
        self.notes = notes;
        Ok(note)
    }

    fn update_note(&mut self, id: &NoteId, update: NoteUpdate) -> StoreResult<Note> {
        let idx = index_of(&self.notes, id)
            .ok_or_else(|| StoreError::NoteNotFound { id: id.to_string() })?;

        let mut notes = self.notes.clone();
        remove_links(&mut notes, id);

        let existing = &notes[idx];
        let title = update.title.unwrap_or_else(|| existing.title().to_string());
        let content = update
            .content
            .unwrap_or_else(|| existing.content().to_string());
        let tags = update.tags.unwrap_or_else(|| existing.tags().to_vec());
        let parent = update
            .parent
            .unwrap_or_else(|| existing.parent().cloned());

        let rebuilt = Note::builder(id.clone(), title, existing.created(), Utc::now())
            .content(content.clone())
            .parent(parent)
            .tags(tags)
            .backlinks(existing.backlinks().to_vec())
            .build()
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
        notes[idx] = rebuilt;

        let links = update_links(&mut notes, id, &content);
        notes[idx].set_links(links);

        let updated = notes[idx].clone();
        self.write_file(&notes)?;
        self.notes = notes;
        Ok(updated)
    }

    fn delete_note(&mut self, id: &NoteId) -> StoreResult<()> {
        let idx = index_of(&self.notes, id)
            .ok_or_else(|| StoreError::NoteNotFound { id: id.to_string() })?;

        let mut notes = self.notes.clone();
        remove_links(&mut notes, id);
        notes.remove(idx);

        self.write_file(&notes)?;
        self.notes = notes;
        Ok(())
    }

    fn search(&self, query: &str) -> StoreResult<Vec<SearchHit>> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self
            .notes
            .iter()
            .filter(|note| {
                note.title().to_lowercase().contains(&q)
                    || note.content().to_lowercase().contains(&q)
                    || note.tags().iter().any(|t| t.as_str().contains(&q))
            })
            .map(|note| SearchHit {
                id: note.id().clone(),
                title: note.title().to_string(),
                preview: preview_of(note.content()),
            })
            .collect();

        Ok(hits)
    }

    fn upload(&mut self, filename: &str, bytes: &[u8]) -> StoreResult<UploadSnippet> {
        let (stem, ext) = filename
            .rsplit_once('.')
            .ok_or_else(|| StoreError::InvalidUpload(format!("no file extension: {filename}")))?;
        let ext = ext.to_lowercase();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(StoreError::InvalidUpload(format!(
                "file type not allowed: .{ext}"
            )));
        }

        let stem = sanitize_stem(stem);
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let stored = format!("{stem}_{stamp}.{ext}");

        std::fs::create_dir_all(&self.uploads_dir).map_err(|e| StoreError::Io {
            path: self.uploads_dir.clone(),
            source: e,
        })?;
        let dest = self.uploads_dir.join(&stored);
        std::fs::write(&dest, bytes).map_err(|e| StoreError::Io {
            path: dest.clone(),
            source: e,
        })?;

        let url = format!("uploads/{stored}");
        Ok(UploadSnippet {
            markdown: format!("![{stem}]({url})"),
            url,
        })
    }
}
