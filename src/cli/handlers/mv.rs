//! Retitle / re-parent command handler.

use anyhow::{Result, bail};
use std::path::Path;

use super::{open_session, resolve_id};
use crate::cli::MvArgs;
use crate::store::NoteUpdate;

pub fn handle_mv(args: &MvArgs, garden_file: &Path) -> Result<()> {
    if args.title.is_none() && args.parent.is_none() && !args.root {
        bail!("nothing to do: pass --title, --parent, or --root");
    }

    let mut session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;

    let parent = if args.root {
        Some(None)
    } else if let Some(identifier) = &args.parent {
        let parent_id = resolve_id(&session, identifier)?;
        if parent_id == id {
            bail!("a note cannot be its own parent");
        }
        Some(Some(parent_id))
    } else {
        None
    };

    let note = session.save(
        &id,
        NoteUpdate {
            title: args.title.clone(),
            parent,
            ..NoteUpdate::default()
        },
    )?;

    println!("Moved: {} [{}]", note.title(), note.id().prefix());
    Ok(())
}
