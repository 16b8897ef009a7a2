//! Attach command handler: upload an image and splice it into a note.

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::{open_session, resolve_id};
use crate::cli::AttachArgs;
use crate::model::splice;
use crate::store::NoteUpdate;

pub fn handle_attach(args: &AttachArgs, garden_file: &Path) -> Result<()> {
    let mut session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;

    let Some(filename) = args.image.file_name().and_then(|n| n.to_str()) else {
        bail!("invalid image path: {}", args.image.display());
    };
    let filename = filename.to_string();

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read image: {}", args.image.display()))?;

    let content = session
        .collection()
        .get(&id)
        .map(|n| n.content().to_string())
        .unwrap_or_default();

    let snippet = session.upload(&filename, &bytes)?;

    let cursor = args.at.unwrap_or(content.len());
    let updated = splice(&content, cursor, &snippet.markdown);

    let note = session.save(
        &id,
        NoteUpdate {
            content: Some(updated),
            ..NoteUpdate::default()
        },
    )?;

    println!("Attached {} to {} [{}]", snippet.url, note.title(), note.id().prefix());
    Ok(())
}
