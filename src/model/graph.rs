//! Link-graph derivation for visualization.

use crate::domain::NoteId;
use crate::model::{NoteCollection, extract_links};
use serde::Serialize;

/// A node in the link graph: one per note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub title: String,
}

/// How an edge arose, so renderers can style the two kinds differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// From a resolved `[[Title]]` reference in the source note's content.
    Link,
    /// From a parent/child relationship (source = parent, target = child).
    Hierarchy,
}

/// A directed edge in the link graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: NoteId,
    pub target: NoteId,
    pub kind: EdgeKind,
}

/// The derived graph: ready to hand to a force-directed renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    /// Returns the graph nodes, one per note in collection order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Returns the graph edges.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Derives the link graph from the current note collection.
///
/// Every note becomes a node. Each `[[Title]]` occurrence that resolves
/// produces an associative [`EdgeKind::Link`] edge from the containing note
/// to the target; occurrences are kept in content order and duplicates are
/// preserved, so two references to the same target yield two edges.
/// Unresolved references (stubs) produce no edge at all rather than a
/// dangling node. Each parent pointer that resolves produces one
/// [`EdgeKind::Hierarchy`] edge from parent to child.
///
/// Pure and cheap enough to re-run on every render.
///
/// # Examples
///
/// ```
/// use garden::domain::{Note, NoteId};
/// use garden::model::{NoteCollection, build_graph, EdgeKind};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let alpha = Note::new(NoteId::new(), "Alpha", now, now).unwrap();
/// let beta = Note::builder(NoteId::new(), "Beta", now, now)
///     .content("See [[Alpha]] and [[Nowhere]]")
///     .build()
///     .unwrap();
///
/// let notes = NoteCollection::from_notes(vec![alpha, beta]);
/// let graph = build_graph(&notes);
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1); // [[Nowhere]] is a stub, no edge
/// assert_eq!(graph.edges()[0].kind, EdgeKind::Link);
/// ```
pub fn build_graph(collection: &NoteCollection) -> Graph {
    let nodes = collection
        .iter()
        .map(|note| GraphNode {
            id: note.id().clone(),
            title: note.title().to_string(),
        })
        .collect();

    let mut edges = Vec::new();

    for note in collection.iter() {
        for title in extract_links(note.content()) {
            if let Some(target) = collection.resolve_link_target(title) {
                edges.push(GraphEdge {
                    source: note.id().clone(),
                    target: target.clone(),
                    kind: EdgeKind::Link,
                });
            }
        }
    }

    for note in collection.iter() {
        if let Some(parent) = note.parent() {
            if collection.contains(parent) {
                edges.push(GraphEdge {
                    source: parent.clone(),
                    target: note.id().clone(),
                    kind: EdgeKind::Hierarchy,
                });
            }
        }
    }

    Graph { nodes, edges }
}
