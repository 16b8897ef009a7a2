//! The owned in-memory note collection.

use crate::domain::{Note, NoteId};

/// The full set of notes for one session, in insertion order.
///
/// The collection is loaded once from the note store and mutated locally
/// after each remote operation succeeds: a mutation always replaces the whole
/// record, never a diff. All derivations (tree, graph, backlinks) borrow the
/// collection immutably and are safe to re-run on every render.
///
/// Insertion order is significant: the tree renderer shows roots and children
/// in this order, and ambiguous title resolution picks the first match in it.
///
/// # Examples
///
/// ```
/// use garden::domain::{Note, NoteId};
/// use garden::model::NoteCollection;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let note = Note::new(NoteId::new(), "Mulch", now, now).unwrap();
/// let id = note.id().clone();
///
/// let mut notes = NoteCollection::new();
/// notes.add_note(note);
/// assert_eq!(notes.resolve_link_target("mulch"), Some(&id));
/// assert_eq!(notes.resolve_link_target("Unknown"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from a list of notes, preserving order.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Returns the number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if the collection holds no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Iterates over the notes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Looks up a note by id.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Returns true if a note with this id exists.
    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Adds a note to the end of the collection.
    ///
    /// If a note with the same id already exists, it is replaced in place
    /// instead, keeping ids unique.
    pub fn add_note(&mut self, note: Note) {
        if let Some(existing) = self.notes.iter_mut().find(|n| n.id() == note.id()) {
            *existing = note;
        } else {
            self.notes.push(note);
        }
    }

    /// Replaces the note with the same id, preserving its position.
    ///
    /// Returns false (and changes nothing) if no note with that id exists.
    pub fn replace_note(&mut self, note: Note) -> bool {
        match self.notes.iter_mut().find(|n| n.id() == note.id()) {
            Some(existing) => {
                *existing = note;
                true
            }
            None => false,
        }
    }

    /// Removes the note with the given id.
    ///
    /// Returns false if no note with that id exists.
    pub fn remove_note(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id() != id);
        self.notes.len() != before
    }

    /// Resolves a wikilink title to a note id.
    ///
    /// Titles are matched exactly but case-insensitively, with full Unicode
    /// case folding so `[[über]]` finds a note titled "Über". Titles are not
    /// guaranteed unique; when several notes share one, the first match in
    /// insertion order wins. This tie-break is arbitrary but stable; callers
    /// that need precision should address notes by id.
    ///
    /// Returns `None` when no note has the title: the reference is a stub,
    /// which callers display distinctly rather than treating as an error.
    pub fn resolve_link_target(&self, title: &str) -> Option<&NoteId> {
        let needle = title.to_lowercase();
        self.notes
            .iter()
            .find(|n| n.title().to_lowercase() == needle)
            .map(|n| n.id())
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
