//! Show and Edit command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::new::edit_in_editor;
use super::{open_session, resolve_id};
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{EditArgs, ShowArgs};
use crate::store::NoteUpdate;

pub fn handle_show(args: &ShowArgs, garden_file: &Path) -> Result<()> {
    let session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;
    let detail = session.get(&id).context("failed to load note")?;

    match args.format {
        OutputFormat::Human => {
            let note = &detail.note;

            println!("# {}", note.title());
            println!();
            println!(
                "ID: {}  Created: {}  Modified: {}",
                note.id().prefix(),
                note.created().format("%Y-%m-%d"),
                note.modified().format("%Y-%m-%d")
            );

            if let Some(parent_id) = note.parent() {
                match session.collection().get(parent_id) {
                    Some(parent) => println!("Parent: {} [{}]", parent.title(), parent_id.prefix()),
                    None => println!("Parent: {} (missing)", parent_id.prefix()),
                }
            }

            if !note.tags().is_empty() {
                let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
                println!("Tags: {}", tags.join(", "));
            }

            println!();

            if !note.content().is_empty() {
                println!("{}", note.content());
            }

            if !detail.backlinks.is_empty() {
                println!();
                println!("Linked from:");
                for backlink in &detail.backlinks {
                    println!("  {} [{}]", backlink.title, backlink.id.prefix());
                }
            }
        }
        OutputFormat::Json => {
            let output = Output::new(&detail);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

pub fn handle_edit(args: &EditArgs, garden_file: &Path, config: &Config) -> Result<()> {
    let mut session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;

    let content = session
        .collection()
        .get(&id)
        .map(|n| n.content().to_string())
        .unwrap_or_default();

    let edited = edit_in_editor(&content, config)?;

    if edited == content {
        println!("No changes.");
        return Ok(());
    }

    let note = session.save(
        &id,
        NoteUpdate {
            content: Some(edited),
            ..NoteUpdate::default()
        },
    )?;

    println!("Edited: {} [{}]", note.title(), note.id().prefix());
    Ok(())
}
