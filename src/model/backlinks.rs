//! Local backlink derivation.
//!
//! The note store normally supplies backlinks with each record; this module
//! is the client-side fallback that derives them directly from content.

use crate::domain::NoteId;
use crate::model::{NoteCollection, extract_links};

/// Options for backlink derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklinkOptions {
    /// Whether a note that wikilinks its own title counts as its own
    /// backlink. Defaults to true: the store's backlink maintenance applies
    /// no self-exclusion, and the fallback matches it.
    pub include_self: bool,
}

impl Default for BacklinkOptions {
    fn default() -> Self {
        Self { include_self: true }
    }
}

/// Computes the notes whose content links to `target`.
///
/// A note is a backlink of `target` when at least one of its `[[Title]]`
/// references resolves to `target`; it appears once in the result no matter
/// how many times it links. Results are in collection order.
///
/// # Examples
///
/// ```
/// use garden::domain::{Note, NoteId};
/// use garden::model::{BacklinkOptions, NoteCollection, compute_backlinks};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let alpha = Note::new(NoteId::new(), "Alpha", now, now).unwrap();
/// let beta = Note::builder(NoteId::new(), "Beta", now, now)
///     .content("See [[Alpha]]")
///     .build()
///     .unwrap();
/// let alpha_id = alpha.id().clone();
/// let beta_id = beta.id().clone();
///
/// let notes = NoteCollection::from_notes(vec![alpha, beta]);
/// let backlinks = compute_backlinks(&notes, &alpha_id, BacklinkOptions::default());
/// assert_eq!(backlinks, vec![beta_id]);
/// ```
pub fn compute_backlinks(
    collection: &NoteCollection,
    target: &NoteId,
    options: BacklinkOptions,
) -> Vec<NoteId> {
    let mut backlinks = Vec::new();

    for note in collection.iter() {
        if !options.include_self && note.id() == target {
            continue;
        }
        let links_to_target = extract_links(note.content())
            .into_iter()
            .any(|title| collection.resolve_link_target(title) == Some(target));
        if links_to_target {
            backlinks.push(note.id().clone());
        }
    }

    backlinks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Note;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn test_id(n: u8) -> NoteId {
        format!("00000000-0000-0000-0000-0000000000{:02x}", n)
            .parse()
            .unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn note(n: u8, title: &str, content: &str) -> Note {
        Note::builder(test_id(n), title, now(), now())
            .content(content)
            .build()
            .unwrap()
    }

    #[test]
    fn finds_linking_notes_in_collection_order() {
        let notes = NoteCollection::from_notes(vec![
            note(1, "Alpha", ""),
            note(2, "Beta", "[[Alpha]]"),
            note(3, "Gamma", "no links"),
            note(4, "Delta", "also [[Alpha]]"),
        ]);
        let backlinks = compute_backlinks(&notes, &test_id(1), BacklinkOptions::default());
        assert_eq!(backlinks, vec![test_id(2), test_id(4)]);
    }

    #[test]
    fn double_link_counts_once_per_source() {
        let notes = NoteCollection::from_notes(vec![
            note(1, "Alpha", ""),
            note(2, "Beta", "[[Alpha]] and [[Alpha]]"),
        ]);
        let backlinks = compute_backlinks(&notes, &test_id(1), BacklinkOptions::default());
        assert_eq!(backlinks, vec![test_id(2)]);
    }

    #[test]
    fn unresolved_links_do_not_count() {
        let notes = NoteCollection::from_notes(vec![
            note(1, "Alpha", ""),
            note(2, "Beta", "[[Unknown Note]]"),
        ]);
        let backlinks = compute_backlinks(&notes, &test_id(1), BacklinkOptions::default());
        assert!(backlinks.is_empty());
    }

    #[test]
    fn self_link_counts_by_default() {
        let notes = NoteCollection::from_notes(vec![note(1, "Alpha", "I am [[Alpha]]")]);
        let backlinks = compute_backlinks(&notes, &test_id(1), BacklinkOptions::default());
        assert_eq!(backlinks, vec![test_id(1)]);
    }

    #[test]
    fn self_link_excluded_when_configured() {
        let notes = NoteCollection::from_notes(vec![
            note(1, "Alpha", "I am [[Alpha]]"),
            note(2, "Beta", "[[Alpha]]"),
        ]);
        let options = BacklinkOptions {
            include_self: false,
        };
        let backlinks = compute_backlinks(&notes, &test_id(1), options);
        assert_eq!(backlinks, vec![test_id(2)]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let notes = NoteCollection::from_notes(vec![
            note(1, "Compost Heap", ""),
            note(2, "Beta", "[[compost heap]]"),
        ]);
        let backlinks = compute_backlinks(&notes, &test_id(1), BacklinkOptions::default());
        assert_eq!(backlinks, vec![test_id(2)]);
    }

    #[test]
    fn ambiguous_title_backlinks_go_to_first_match() {
        // Two notes titled "Duplicate"; links resolve to the first, so only
        // the first accrues backlinks.
        let notes = NoteCollection::from_notes(vec![
            note(1, "Duplicate", ""),
            note(2, "Duplicate", ""),
            note(3, "Gamma", "[[Duplicate]]"),
        ]);
        assert_eq!(
            compute_backlinks(&notes, &test_id(1), BacklinkOptions::default()),
            vec![test_id(3)]
        );
        assert!(compute_backlinks(&notes, &test_id(2), BacklinkOptions::default()).is_empty());
    }
}
