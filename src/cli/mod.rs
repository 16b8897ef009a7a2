//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// garden - a digital garden of linked markdown notes
#[derive(Parser, Debug)]
#[command(name = "garden", version, about, long_about = None)]
pub struct Cli {
    /// Garden file (overrides config file)
    #[arg(short = 'f', long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// List notes, optionally filtered by tag
    #[command(name = "ls")]
    List(ListArgs),

    /// Print the note hierarchy as a tree
    Tree(TreeArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// Edit a note's content in your editor
    Edit(EditArgs),

    /// Delete a note
    Rm(RmArgs),

    /// Search titles, content, and tags
    Search(SearchArgs),

    /// Show notes that link to a given note
    Backlinks(BacklinksArgs),

    /// Add a tag to a note
    Tag(TagArgs),

    /// Remove a tag from a note
    Untag(UntagArgs),

    /// Print the link graph
    Graph(GraphArgs),

    /// Retitle or re-parent a note
    Mv(MvArgs),

    /// Attach an image to a note
    Attach(AttachArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Markdown content (may contain [[Title]] wikilinks)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Parent note (ID prefix or title)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Open in editor after creation
    #[arg(short, long)]
    pub edit: bool,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Filter by tag (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID prefix or title
    pub note: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID prefix or title
    pub note: String,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID prefix or title
    pub note: String,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note ID prefix or title
    pub note: String,

    /// Derive backlinks from current content instead of stored lists
    #[arg(long)]
    pub live: bool,

    /// Skip notes that only link to themselves
    #[arg(long)]
    pub exclude_self: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tag` command (add tag to note)
#[derive(Parser, Debug)]
pub struct TagArgs {
    /// Note ID prefix or title
    pub note: String,

    /// Tag to add
    pub tag: String,
}

/// Arguments for the `untag` command (remove tag from note)
#[derive(Parser, Debug)]
pub struct UntagArgs {
    /// Note ID prefix or title
    pub note: String,

    /// Tag to remove
    pub tag: String,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for the `mv` command (retitle / re-parent)
#[derive(Parser, Debug)]
pub struct MvArgs {
    /// Note ID prefix or title
    pub note: String,

    /// New title for the note
    #[arg(long)]
    pub title: Option<String>,

    /// New parent (ID prefix or title)
    #[arg(short, long, conflicts_with = "root")]
    pub parent: Option<String>,

    /// Make the note a root (clear its parent)
    #[arg(long)]
    pub root: bool,
}

/// Arguments for the `attach` command
#[derive(Parser, Debug)]
pub struct AttachArgs {
    /// Note ID prefix or title
    pub note: String,

    /// Image file to attach (png, jpg, jpeg, gif, webp)
    pub image: PathBuf,

    /// Byte offset in the content to insert at (defaults to the end)
    #[arg(long)]
    pub at: Option<usize>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
