//! New note command handler.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

use super::{open_session, resolve_id};
use crate::cli::NewArgs;
use crate::cli::config::Config;
use crate::domain::Tag;
use crate::store::{NewNote, NoteUpdate};

pub fn handle_new(args: &NewArgs, garden_file: &Path, config: &Config) -> Result<()> {
    let mut session = open_session(garden_file)?;

    let mut tags = Vec::new();
    for tag_str in &args.tags {
        let tag = Tag::new(tag_str).with_context(|| {
            format!(
                "invalid tag '{}': tags must contain only alphanumeric characters, hyphens, and underscores (no spaces)",
                tag_str
            )
        })?;
        tags.push(tag);
    }

    let parent = match &args.parent {
        Some(identifier) => Some(resolve_id(&session, identifier)?),
        None => None,
    };

    let note = session.create(NewNote {
        title: args.title.clone(),
        content: args.content.clone().unwrap_or_default(),
        tags,
        parent,
    })?;

    println!("Created: {} [{}]", note.title(), note.id().prefix());

    if args.edit {
        let id = note.id().clone();
        let edited = edit_in_editor(note.content(), config)?;
        session.save(
            &id,
            NoteUpdate {
                content: Some(edited),
                ..NoteUpdate::default()
            },
        )?;
    }

    Ok(())
}

/// Opens `content` in the user's configured editor and returns the result.
///
/// The content is written to a temp file, the editor runs to completion,
/// and the file is read back.
pub(crate) fn edit_in_editor(content: &str, config: &Config) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("garden-")
        .suffix(".md")
        .tempfile()
        .context("failed to create temp file for editing")?;

    std::fs::write(file.path(), content).context("failed to write temp file for editing")?;

    open_in_editor(file.path(), config)?;

    std::fs::read_to_string(file.path()).context("failed to read edited content")
}

/// Opens a file in the user's configured editor.
pub(crate) fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Parse editor command (may include args like "code --wait")
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, cmd_args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(cmd_args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}
