//! List and tree command handlers.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use super::open_session;
use crate::cli::output::{NoteListing, Output, OutputFormat, TreeListing};
use crate::cli::{ListArgs, TreeArgs};
use crate::domain::{Note, Tag};
use crate::model::{TreeNode, build_tree};

pub fn handle_list(args: &ListArgs, garden_file: &Path) -> Result<()> {
    let session = open_session(garden_file)?;

    let mut notes: Vec<&Note> = session.collection().iter().collect();

    // Filter by tags (AND logic)
    if !args.tags.is_empty() {
        let required_tags: HashSet<Tag> = args
            .tags
            .iter()
            .map(|t| Tag::new(t))
            .collect::<Result<_, _>>()
            .context("invalid tag")?;
        notes.retain(|n| {
            let note_tags: HashSet<_> = n.tags().iter().cloned().collect();
            required_tags.is_subset(&note_tags)
        });
    }

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                for note in &notes {
                    if note.tags().is_empty() {
                        println!("{} {}", note.id().prefix(), note.title());
                    } else {
                        let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
                        println!(
                            "{} {} #{}",
                            note.id().prefix(),
                            note.title(),
                            tags.join(" #")
                        );
                    }
                }
                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| note_listing(n)).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

pub fn handle_tree(args: &TreeArgs, garden_file: &Path) -> Result<()> {
    let session = open_session(garden_file)?;
    let forest = build_tree(session.collection());

    for issue in forest.issues() {
        eprintln!("warning: {}", issue);
    }

    match args.format {
        OutputFormat::Human => {
            if forest.roots().is_empty() {
                println!("No notes found.");
            } else {
                for root in forest.roots() {
                    print_node(root, 0);
                }
                println!();
                println!("{} note(s)", forest.node_count());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TreeListing> = forest.roots().iter().map(tree_listing).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn note_listing(note: &Note) -> NoteListing {
    NoteListing {
        id: note.id().to_string(),
        title: note.title().to_string(),
        tags: note.tags().iter().map(|t| t.as_str().to_string()).collect(),
        parent: note.parent().map(|p| p.to_string()),
    }
}

fn print_node(node: &TreeNode<'_>, depth: usize) {
    println!(
        "{}{} [{}]",
        "  ".repeat(depth),
        node.note().title(),
        node.note().id().prefix()
    );
    for child in node.children() {
        print_node(child, depth + 1);
    }
}

fn tree_listing(node: &TreeNode<'_>) -> TreeListing {
    TreeListing {
        id: node.note().id().to_string(),
        title: node.note().title().to_string(),
        children: node.children().iter().map(tree_listing).collect(),
    }
}
