//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{browse, config, export, search};

/// Browse, sort, edit and export catalog search results.
#[derive(Parser, Debug)]
#[command(name = "shelfview")]
#[command(author, version = env!("SHELFVIEW_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Record source URL (https://… or file:///path/to/catalog.json)
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search and print one page of results
    Search(search::SearchArgs),

    /// Search and write the results as CSV
    Export(export::ExportArgs),

    /// Interactive session: search, page, sort, edit, export
    Browse(browse::BrowseArgs),

    /// Show the config file location and effective settings
    Config(config::ConfigArgs),
}
