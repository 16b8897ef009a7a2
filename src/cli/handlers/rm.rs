//! Delete command handler.

use anyhow::Result;
use std::path::Path;

use super::{open_session, resolve_id};
use crate::cli::RmArgs;

pub fn handle_rm(args: &RmArgs, garden_file: &Path) -> Result<()> {
    let mut session = open_session(garden_file)?;
    let id = resolve_id(&session, &args.note)?;

    let title = session
        .collection()
        .get(&id)
        .map(|n| n.title().to_string())
        .unwrap_or_default();

    session.delete(&id)?;

    println!("Deleted: {} [{}]", title, id.prefix());
    Ok(())
}
