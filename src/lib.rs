//! garden - a digital garden of linked markdown notes

pub mod cli;
pub mod domain;
pub mod model;
pub mod session;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_attach, handle_backlinks, handle_edit, handle_graph, handle_list, handle_mv,
        handle_new, handle_rm, handle_search, handle_show, handle_tag, handle_tree, handle_untag,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let garden_file = config.garden_file(cli.file.as_ref());

    match &cli.command {
        Command::New(args) => handle_new(args, &garden_file, &config),
        Command::List(args) => handle_list(args, &garden_file),
        Command::Tree(args) => handle_tree(args, &garden_file),
        Command::Show(args) => handle_show(args, &garden_file),
        Command::Edit(args) => handle_edit(args, &garden_file, &config),
        Command::Rm(args) => handle_rm(args, &garden_file),
        Command::Search(args) => handle_search(args, &garden_file),
        Command::Backlinks(args) => handle_backlinks(args, &garden_file),
        Command::Tag(args) => handle_tag(args, &garden_file),
        Command::Untag(args) => handle_untag(args, &garden_file),
        Command::Graph(args) => handle_graph(args, &garden_file),
        Command::Mv(args) => handle_mv(args, &garden_file),
        Command::Attach(args) => handle_attach(args, &garden_file),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "garden", &mut std::io::stdout());
            Ok(())
        }
    }
}
