//! Note resolution utilities.

use crate::domain::Note;
use crate::model::NoteCollection;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult<'a> {
    /// Exactly one note matched.
    Unique(&'a Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'a Note>),
    /// No notes matched.
    NotFound,
}

/// Prints detailed information about ambiguous notes to help distinguish them.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id().prefix(), note.title());

        if !note.tags().is_empty() {
            let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
            eprintln!("      tags: {}", tags.join(", "));
        }
    }
    eprintln!();
    eprintln!("Use the ID prefix to specify which note you mean.");
}

/// Resolves a note identifier to a unique note.
///
/// Resolution order:
/// 1. ID prefix match (if input looks like a UUID prefix)
/// 2. Title match (case-insensitive)
///
/// Returns `Unique` if exactly one note matches across both methods,
/// `Ambiguous` if multiple notes match, or `NotFound` if no match.
pub fn resolve_note<'a>(collection: &'a NoteCollection, identifier: &str) -> ResolveResult<'a> {
    let identifier = identifier.trim();

    // UUIDs are lowercase hex with dashes; 4+ chars is a usable prefix
    let looks_like_id = identifier.len() >= 4
        && identifier
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '-');

    let mut candidates: Vec<&Note> = Vec::new();

    if looks_like_id {
        let prefix = identifier.to_ascii_lowercase();
        let id_matches: Vec<&Note> = collection
            .iter()
            .filter(|n| n.id().to_string().starts_with(&prefix))
            .collect();

        // A unique ID match wins outright; IDs are the most precise
        if id_matches.len() == 1 {
            return ResolveResult::Unique(id_matches[0]);
        }

        candidates.extend(id_matches);
    }

    let needle = identifier.to_lowercase();
    candidates.extend(
        collection
            .iter()
            .filter(|n| n.title().to_lowercase() == needle),
    );

    // Deduplicate by ID, keeping collection order
    let mut seen = Vec::new();
    candidates.retain(|n| {
        if seen.contains(n.id()) {
            false
        } else {
            seen.push(n.id().clone());
            true
        }
    });

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates[0]),
        _ => ResolveResult::Ambiguous(candidates),
    }
}
