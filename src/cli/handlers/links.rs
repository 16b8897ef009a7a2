//! Backlinks and graph command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::{open_session, resolve_id};
use crate::cli::output::{BacklinkListing, Output, OutputFormat};
use crate::cli::{BacklinksArgs, GraphArgs};
use crate::domain::NoteId;
use crate::model::{BacklinkOptions, EdgeKind, build_graph, compute_backlinks};
use crate::session::Session;
use crate::store::{BacklinkRef, JsonStore};

pub fn handle_backlinks(args: &BacklinksArgs, garden_file: &Path) -> Result<()> {
    let session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;

    let mut backlinks: Vec<BacklinkRef> = if args.live {
        // Derive from current content rather than the stored lists
        let options = BacklinkOptions {
            include_self: !args.exclude_self,
        };
        compute_backlinks(session.collection(), &id, options)
            .iter()
            .filter_map(|source| session.collection().get(source))
            .map(|note| BacklinkRef {
                id: note.id().clone(),
                title: note.title().to_string(),
            })
            .collect()
    } else {
        let detail = session.get(&id).context("failed to load note")?;
        detail.backlinks
    };

    if args.exclude_self {
        backlinks.retain(|b| b.id != id);
    }

    match args.format {
        OutputFormat::Human => {
            if backlinks.is_empty() {
                println!("No backlinks found.");
            } else {
                for backlink in &backlinks {
                    println!("{} {}", backlink.id.prefix(), backlink.title);
                }
                println!();
                println!("{} backlink(s)", backlinks.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<BacklinkListing> = backlinks
                .into_iter()
                .map(|b| BacklinkListing {
                    id: b.id.to_string(),
                    title: b.title,
                })
                .collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

pub fn handle_graph(args: &GraphArgs, garden_file: &Path) -> Result<()> {
    let session = open_session(garden_file)?;
    let graph = build_graph(session.collection());

    match args.format {
        OutputFormat::Human => {
            println!(
                "{} node(s), {} edge(s)",
                graph.node_count(),
                graph.edge_count()
            );
            if !graph.edges().is_empty() {
                println!();
                for edge in graph.edges() {
                    let kind = match edge.kind {
                        EdgeKind::Link => "link",
                        EdgeKind::Hierarchy => "hierarchy",
                    };
                    println!(
                        "{} -> {} ({})",
                        title_of(&session, &edge.source),
                        title_of(&session, &edge.target),
                        kind
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
    }

    Ok(())
}

fn title_of(session: &Session<JsonStore>, id: &NoteId) -> String {
    session
        .collection()
        .get(id)
        .map(|n| n.title().to_string())
        .unwrap_or_else(|| id.prefix())
}
