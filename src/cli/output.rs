//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// One node of tree output, children nested.
#[derive(Debug, Serialize)]
pub struct TreeListing {
    pub id: String,
    pub title: String,
    pub children: Vec<TreeListing>,
}

/// A single search hit in listing output.
#[derive(Debug, Serialize)]
pub struct SearchListing {
    pub id: String,
    pub title: String,
    pub preview: String,
}

/// A single backlink in listing output.
#[derive(Debug, Serialize)]
pub struct BacklinkListing {
    pub id: String,
    pub title: String,
}
