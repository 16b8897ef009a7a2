//! Client session: one owned note collection over one note store.

use crate::domain::{Note, NoteId};
use crate::model::NoteCollection;
use crate::store::{NewNote, NoteDetail, NoteStore, NoteUpdate, SearchHit, StoreResult, UploadSnippet};

/// Owns the in-memory note collection for one client session.
///
/// The collection is loaded once and then kept consistent locally: each
/// mutator calls the store first and applies the returned record to the
/// collection only when the call succeeds, so a store failure never leaves
/// the local state partially mutated. Derivations (`build_tree`,
/// `build_graph`, `compute_backlinks`) run against [`Session::collection`].
///
/// There is exactly one mutator at a time; derivations borrow immutably.
pub struct Session<S: NoteStore> {
    store: S,
    collection: NoteCollection,
}

impl<S: NoteStore> Session<S> {
    /// Creates a session over `store` and loads the full note set.
    pub fn open(store: S) -> StoreResult<Self> {
        let mut session = Self {
            store,
            collection: NoteCollection::new(),
        };
        session.reload()?;
        Ok(session)
    }

    /// Re-fetches the full note set, replacing the local collection.
    pub fn reload(&mut self) -> StoreResult<()> {
        let notes = self.store.list_notes()?;
        self.collection = NoteCollection::from_notes(notes);
        Ok(())
    }

    /// Returns the current note collection.
    pub fn collection(&self) -> &NoteCollection {
        &self.collection
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches one note with resolved backlink details.
    pub fn get(&self, id: &NoteId) -> StoreResult<NoteDetail> {
        self.store.get_note(id)
    }

    /// Creates a note and adds it to the local collection.
    ///
    /// Stub notes the store materializes for unresolved wikilinks are not
    /// fetched eagerly; call [`Session::reload`] to pick them up.
    pub fn create(&mut self, new: NewNote) -> StoreResult<Note> {
        let note = self.store.create_note(new)?;
        self.collection.add_note(note.clone());
        Ok(note)
    }

    /// Updates a note, replacing the local record wholesale on success.
    pub fn save(&mut self, id: &NoteId, update: NoteUpdate) -> StoreResult<Note> {
        let updated = self.store.update_note(id, update)?;
        self.collection.replace_note(updated.clone());
        Ok(updated)
    }

    /// Deletes a note locally and remotely.
    pub fn delete(&mut self, id: &NoteId) -> StoreResult<()> {
        self.store.delete_note(id)?;
        self.collection.remove_note(id);
        Ok(())
    }

    /// Searches via the store; results arrive ranked and are not re-ranked.
    pub fn search(&self, query: &str) -> StoreResult<Vec<SearchHit>> {
        self.store.search(query)
    }

    /// Uploads a file via the store, returning the markdown snippet to
    /// splice into a note's content.
    pub fn upload(&mut self, filename: &str, bytes: &[u8]) -> StoreResult<UploadSnippet> {
        self.store.upload(filename, bytes)
    }
}
