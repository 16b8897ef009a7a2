//! Search command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_session;
use crate::cli::SearchArgs;
use crate::cli::output::{Output, OutputFormat, SearchListing};
use crate::store::SearchHit;

pub fn handle_search(args: &SearchArgs, garden_file: &Path) -> Result<()> {
    let session = open_session(garden_file)?;

    let results = session
        .search(&args.query)
        .with_context(|| format!("search failed for query: {}", args.query))?;

    format_search_output(&results, args.format)?;

    Ok(())
}

/// Format and print search results (already ranked by the store).
fn format_search_output(results: &[SearchHit], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if results.is_empty() {
                println!("No matching notes found.");
            } else {
                for result in results {
                    println!("{} {}", result.id.prefix(), result.title);
                    if !result.preview.is_empty() {
                        println!("  {}", result.preview);
                    }
                }
                println!();
                println!("{} result(s)", results.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<SearchListing> = results
                .iter()
                .map(|r| SearchListing {
                    id: r.id.to_string(),
                    title: r.title.clone(),
                    preview: r.preview.clone(),
                })
                .collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
