//! Tree derivation: builds the sidebar forest from flat parent pointers.

use crate::domain::{Note, NoteId};
use crate::model::NoteCollection;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A note and its children in the derived forest.
///
/// Borrows from the collection it was built from; rebuild after any mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    note: &'a Note,
    children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    /// Returns the note at this position in the forest.
    pub fn note(&self) -> &'a Note {
        self.note
    }

    /// Returns this note's children, in collection order.
    pub fn children(&self) -> &[TreeNode<'a>] {
        &self.children
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// A structural problem found while deriving the forest.
///
/// These are warnings, not errors: the rest of the forest is still built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeIssue {
    /// The note sits in (or below) a cycle of parent pointers and was left
    /// out of the forest.
    CyclicParent { id: NoteId },
    /// The note's parent id refers to no note in the collection.
    MissingParent { id: NoteId, parent: NoteId },
    /// The note's own parent exists, but an ancestor further up the chain
    /// has a missing parent, so the whole subtree was left out.
    OrphanedAncestor { id: NoteId, ancestor: NoteId },
}

impl fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeIssue::CyclicParent { id } => {
                write!(f, "note {} is in a cyclic parent chain; subtree omitted", id)
            }
            TreeIssue::MissingParent { id, parent } => {
                write!(f, "note {} has missing parent {}; note omitted", id, parent)
            }
            TreeIssue::OrphanedAncestor { id, ancestor } => {
                write!(
                    f,
                    "note {} is below note {} whose parent is missing; note omitted",
                    id, ancestor
                )
            }
        }
    }
}

/// The derived forest plus any structural warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest<'a> {
    roots: Vec<TreeNode<'a>>,
    issues: Vec<TreeIssue>,
}

impl<'a> Forest<'a> {
    /// Returns the root nodes, in collection order.
    pub fn roots(&self) -> &[TreeNode<'a>] {
        &self.roots
    }

    /// Returns the structural warnings found during derivation.
    pub fn issues(&self) -> &[TreeIssue] {
        &self.issues
    }

    /// Returns the number of notes placed in the forest.
    ///
    /// Equals the collection size exactly when every parent pointer is valid
    /// and acyclic.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::count).sum()
    }
}

/// Builds the ordered forest from a flat note collection.
///
/// Roots are the notes with no parent, in collection order; each node's
/// children are the notes whose parent pointer names it, again in collection
/// order. The collection is never mutated and the derivation is pure: calling
/// it twice yields structurally identical forests.
///
/// Cycles in the parent pointers cannot make the traversal loop (a cycle
/// member is never reachable from a root, and a per-path guard backs that
/// invariant up), but their notes would silently vanish from the forest.
/// Those notes, and notes whose parent id resolves to nothing, are reported
/// as [`TreeIssue`]s instead of crashing the build.
///
/// # Examples
///
/// ```
/// use garden::domain::{Note, NoteId};
/// use garden::model::{NoteCollection, build_tree};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let root = Note::new(NoteId::new(), "Garden", now, now).unwrap();
/// let child = Note::builder(NoteId::new(), "Beds", now, now)
///     .parent(Some(root.id().clone()))
///     .build()
///     .unwrap();
///
/// let notes = NoteCollection::from_notes(vec![root, child]);
/// let forest = build_tree(&notes);
/// assert_eq!(forest.roots().len(), 1);
/// assert_eq!(forest.roots()[0].children().len(), 1);
/// assert_eq!(forest.node_count(), 2);
/// ```
pub fn build_tree(collection: &NoteCollection) -> Forest<'_> {
    let notes = collection.notes();

    // One pass over the input builds an id -> children index that preserves
    // collection order, replacing the O(n^2) filter-per-node of the naive
    // derivation without changing the ordering contract.
    let mut children_of: HashMap<&NoteId, Vec<usize>> = HashMap::new();
    for (idx, note) in notes.iter().enumerate() {
        if let Some(parent) = note.parent() {
            children_of.entry(parent).or_default().push(idx);
        }
    }

    let mut placed: HashSet<usize> = HashSet::new();
    let mut roots = Vec::new();
    for (idx, note) in notes.iter().enumerate() {
        if note.parent().is_none() {
            let mut path = HashSet::new();
            roots.push(attach(idx, notes, &children_of, &mut path, &mut placed));
        }
    }

    let index_of: HashMap<&NoteId, usize> = notes
        .iter()
        .enumerate()
        .map(|(idx, note)| (note.id(), idx))
        .collect();

    let mut issues = Vec::new();
    for idx in 0..notes.len() {
        if placed.contains(&idx) {
            continue;
        }
        issues.push(classify_unplaced(idx, notes, &index_of));
    }

    Forest { roots, issues }
}

/// Walks an unplaced note's parent chain to say why it was left out: the
/// chain either dead-ends at a missing note (at the note itself or further
/// up) or loops.
fn classify_unplaced(idx: usize, notes: &[Note], index_of: &HashMap<&NoteId, usize>) -> TreeIssue {
    let note = &notes[idx];
    let mut visited = HashSet::from([idx]);
    let mut current = idx;

    while let Some(parent) = notes[current].parent() {
        let Some(&parent_idx) = index_of.get(parent) else {
            if current == idx {
                return TreeIssue::MissingParent {
                    id: note.id().clone(),
                    parent: parent.clone(),
                };
            }
            return TreeIssue::OrphanedAncestor {
                id: note.id().clone(),
                ancestor: notes[current].id().clone(),
            };
        };
        if !visited.insert(parent_idx) {
            return TreeIssue::CyclicParent {
                id: note.id().clone(),
            };
        }
        current = parent_idx;
    }

    // A chain ending at a root would have been placed already.
    TreeIssue::CyclicParent {
        id: note.id().clone(),
    }
}

fn attach<'a>(
    idx: usize,
    notes: &'a [Note],
    children_of: &HashMap<&NoteId, Vec<usize>>,
    path: &mut HashSet<usize>,
    placed: &mut HashSet<usize>,
) -> TreeNode<'a> {
    let note = &notes[idx];
    placed.insert(idx);
    path.insert(idx);

    let mut children = Vec::new();
    if let Some(child_indices) = children_of.get(note.id()) {
        for &child_idx in child_indices {
            // Truncate instead of recursing forever if a pointer ever loops
            // back onto the current path.
            if path.contains(&child_idx) {
                continue;
            }
            children.push(attach(child_idx, notes, children_of, path, placed));
        }
    }

    path.remove(&idx);
    TreeNode { note, children }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn root_note(n: u8, title: &str) -> Note {
        Note::new(test_id(n), title, now(), now()).unwrap()
    }

    fn child_note(n: u8, title: &str, parent: u8) -> Note {
        Note::builder(test_id(n), title, now(), now())
            .parent(Some(test_id(parent)))
            .build()
            .unwrap()
    }

    fn titles<'a>(nodes: &[TreeNode<'a>]) -> Vec<&'a str> {
        nodes.iter().map(|n| n.note().title()).collect()
    }

    // ===========================================
    // Shape & ordering
    // ===========================================

    #[test]
    fn empty_collection_builds_empty_forest() {
        let notes = NoteCollection::new();
        let forest = build_tree(&notes);
        assert!(forest.roots().is_empty());
        assert!(forest.issues().is_empty());
        assert_eq!(forest.node_count(), 0);
    }

    #[test]
    fn parentless_notes_become_roots_in_input_order() {
        let notes = NoteCollection::from_notes(vec![
            root_note(1, "Gamma"),
            root_note(2, "Alpha"),
            root_note(3, "Beta"),
        ]);
        let forest = build_tree(&notes);
        // Input order, not sorted.
        assert_eq!(titles(forest.roots()), vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn children_attach_in_input_order() {
        // A(1, root), B(2, parent=1), C(3, parent=1)
        let notes = NoteCollection::from_notes(vec![
            root_note(1, "A"),
            child_note(2, "B", 1),
            child_note(3, "C", 1),
        ]);
        let forest = build_tree(&notes);
        assert_eq!(titles(forest.roots()), vec!["A"]);
        assert_eq!(titles(forest.roots()[0].children()), vec!["B", "C"]);
        assert!(forest.issues().is_empty());
    }

    #[test]
    fn deep_nesting() {
        let notes = NoteCollection::from_notes(vec![
            root_note(1, "L0"),
            child_note(2, "L1", 1),
            child_note(3, "L2", 2),
            child_note(4, "L3", 3),
        ]);
        let forest = build_tree(&notes);
        let mut node = &forest.roots()[0];
        for expected in ["L1", "L2", "L3"] {
            node = &node.children()[0];
            assert_eq!(node.note().title(), expected);
        }
    }

    #[test]
    fn child_defined_before_parent_still_attaches() {
        let notes = NoteCollection::from_notes(vec![child_note(2, "B", 1), root_note(1, "A")]);
        let forest = build_tree(&notes);
        assert_eq!(titles(forest.roots()), vec!["A"]);
        assert_eq!(titles(forest.roots()[0].children()), vec!["B"]);
    }

    // ===========================================
    // Node count & idempotence
    // ===========================================

    #[test]
    fn acyclic_forest_places_every_note_exactly_once() {
        let notes = NoteCollection::from_notes(vec![
            root_note(1, "A"),
            child_note(2, "B", 1),
            child_note(3, "C", 1),
            root_note(4, "D"),
            child_note(5, "E", 4),
            child_note(6, "F", 2),
        ]);
        let forest = build_tree(&notes);
        assert_eq!(forest.node_count(), notes.len());
        assert!(forest.issues().is_empty());
    }

    #[test]
    fn build_is_idempotent() {
        let notes = NoteCollection::from_notes(vec![
            root_note(1, "A"),
            child_note(2, "B", 1),
            child_note(3, "C", 2),
        ]);
        let first = build_tree(&notes);
        let second = build_tree(&notes);
        assert_eq!(first, second);
    }

    #[test]
    fn build_does_not_mutate_collection() {
        let notes = NoteCollection::from_notes(vec![root_note(1, "A"), child_note(2, "B", 1)]);
        let snapshot = notes.clone();
        let _ = build_tree(&notes);
        assert_eq!(notes, snapshot);
    }

    // ===========================================
    // Structural warnings
    // ===========================================

    #[test]
    fn two_note_cycle_terminates_and_keeps_rest_of_forest() {
        // A(parent=B), B(parent=A), plus an honest root.
        let notes = NoteCollection::from_notes(vec![
            child_note(1, "A", 2),
            child_note(2, "B", 1),
            root_note(3, "Sane"),
        ]);
        let forest = build_tree(&notes);

        assert_eq!(titles(forest.roots()), vec!["Sane"]);
        assert_eq!(forest.node_count(), 1);
        assert_eq!(
            forest.issues(),
            &[
                TreeIssue::CyclicParent { id: test_id(1) },
                TreeIssue::CyclicParent { id: test_id(2) },
            ]
        );
    }

    #[test]
    fn self_parent_cycle_is_reported() {
        let notes = NoteCollection::from_notes(vec![child_note(1, "Ouroboros", 1)]);
        let forest = build_tree(&notes);
        assert!(forest.roots().is_empty());
        assert_eq!(
            forest.issues(),
            &[TreeIssue::CyclicParent { id: test_id(1) }]
        );
    }

    #[test]
    fn note_below_cycle_is_also_reported() {
        // C hangs off the A<->B cycle.
        let notes = NoteCollection::from_notes(vec![
            child_note(1, "A", 2),
            child_note(2, "B", 1),
            child_note(3, "C", 1),
        ]);
        let forest = build_tree(&notes);
        assert_eq!(forest.node_count(), 0);
        assert_eq!(forest.issues().len(), 3);
    }

    #[test]
    fn missing_parent_is_reported_distinctly() {
        let notes = NoteCollection::from_notes(vec![root_note(1, "A"), child_note(2, "B", 9)]);
        let forest = build_tree(&notes);
        assert_eq!(titles(forest.roots()), vec!["A"]);
        assert_eq!(
            forest.issues(),
            &[TreeIssue::MissingParent {
                id: test_id(2),
                parent: test_id(9),
            }]
        );
    }

    #[test]
    fn note_below_missing_parent_chain_is_not_called_cyclic() {
        // B's parent A exists, but A's own parent does not. Neither note is
        // in a cycle; they hang off a chain that dead-ends above them.
        let notes = NoteCollection::from_notes(vec![
            child_note(1, "A", 9),
            child_note(2, "B", 1),
        ]);
        let forest = build_tree(&notes);
        assert!(forest.roots().is_empty());
        assert_eq!(
            forest.issues(),
            &[
                TreeIssue::MissingParent {
                    id: test_id(1),
                    parent: test_id(9),
                },
                TreeIssue::OrphanedAncestor {
                    id: test_id(2),
                    ancestor: test_id(1),
                },
            ]
        );
    }

    #[test]
    fn issue_display_mentions_note_id() {
        let issue = TreeIssue::CyclicParent { id: test_id(1) };
        assert!(issue.to_string().contains("cyclic"));
        let issue = TreeIssue::MissingParent {
            id: test_id(2),
            parent: test_id(9),
        };
        assert!(issue.to_string().contains("missing parent"));
        let issue = TreeIssue::OrphanedAncestor {
            id: test_id(3),
            ancestor: test_id(2),
        };
        assert!(issue.to_string().contains("whose parent is missing"));
    }
}
