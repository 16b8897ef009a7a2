//! Command handlers for the CLI.

mod attach;
mod links;
mod list;
mod metadata;
mod mv;
mod new;
mod resolve;
mod rm;
mod search;
mod show_edit;

use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::domain::NoteId;
use crate::session::Session;
use crate::store::JsonStore;

// Re-export public items
pub use attach::handle_attach;
pub use links::{handle_backlinks, handle_graph};
pub use list::{handle_list, handle_tree};
pub use metadata::{handle_tag, handle_untag};
pub use mv::handle_mv;
pub use new::handle_new;
pub use resolve::{ResolveResult, resolve_note};
pub use rm::handle_rm;
pub use search::handle_search;
pub use show_edit::{handle_edit, handle_show};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the garden file and loads a session over it.
pub(crate) fn open_session(garden_file: &Path) -> Result<Session<JsonStore>> {
    let store = JsonStore::open(garden_file)
        .with_context(|| format!("failed to open garden at {}", garden_file.display()))?;
    Session::open(store).context("failed to load notes")
}

/// Resolves an identifier argument to a note id, failing on ambiguity.
pub(crate) fn resolve_id(session: &Session<JsonStore>, identifier: &str) -> Result<NoteId> {
    match resolve_note(session.collection(), identifier) {
        ResolveResult::Unique(note) => Ok(note.id().clone()),
        ResolveResult::Ambiguous(notes) => {
            resolve::print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => {
            bail!("note not found: '{}'", identifier);
        }
    }
}
