//! Tag and untag command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::{open_session, resolve_id};
use crate::cli::{TagArgs, UntagArgs};
use crate::domain::Tag;
use crate::store::NoteUpdate;

pub fn handle_tag(args: &TagArgs, garden_file: &Path) -> Result<()> {
    let mut session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;

    let tag = Tag::new(&args.tag).with_context(|| format!("invalid tag '{}'", args.tag))?;

    let note = session
        .collection()
        .get(&id)
        .context("note disappeared from collection")?;

    if note.tags().contains(&tag) {
        println!("{} is already tagged '{}'", note.title(), tag.as_str());
        return Ok(());
    }

    let mut tags = note.tags().to_vec();
    tags.push(tag.clone());

    let updated = session.save(
        &id,
        NoteUpdate {
            tags: Some(tags),
            ..NoteUpdate::default()
        },
    )?;

    println!("Tagged {} with '{}'", updated.title(), tag.as_str());
    Ok(())
}

pub fn handle_untag(args: &UntagArgs, garden_file: &Path) -> Result<()> {
    let mut session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;

    let tag = Tag::new(&args.tag).with_context(|| format!("invalid tag '{}'", args.tag))?;

    let note = session
        .collection()
        .get(&id)
        .context("note disappeared from collection")?;

    if !note.tags().contains(&tag) {
        println!("{} is not tagged '{}'", note.title(), tag.as_str());
        return Ok(());
    }

    let tags: Vec<Tag> = note
        .tags()
        .iter()
        .filter(|t| **t != tag)
        .cloned()
        .collect();

    let updated = session.save(
        &id,
        NoteUpdate {
            tags: Some(tags),
            ..NoteUpdate::default()
        },
    )?;

    println!("Removed '{}' from {}", tag.as_str(), updated.title());
    Ok(())
}
