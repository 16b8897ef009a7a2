//! The note-graph model: pure derivations over the in-memory collection.
//!
//! Everything here is synchronous and side-effect free: `build_tree`,
//! `build_graph`, `extract_links`, and `compute_backlinks` can run on every
//! render. Mutation goes through [`NoteCollection`]'s mutators, driven by the
//! session layer after store calls succeed.

mod backlinks;
mod collection;
mod graph;
mod snippet;
mod tree;
mod wikilink;

pub use backlinks::{BacklinkOptions, compute_backlinks};
pub use collection::NoteCollection;
pub use graph::{EdgeKind, Graph, GraphEdge, GraphNode, build_graph};
pub use snippet::splice;
pub use tree::{Forest, TreeIssue, TreeNode, build_tree};
pub use wikilink::extract_links;
