//! Subcommand implementations.

pub mod browse;
pub mod config;
pub mod export;
pub mod search;

use anyhow::{Context, Result};
use clap::Args;

use shelfview_core::{
    Field, FetchStatus, QueryParameters, RecordSource, SortDirection, SortState, Table, store,
};

use crate::cli::Commands;
use crate::config::Config;
use crate::output;
use crate::source::CliSource;

pub async fn handle(cmd: Commands, config: &Config) -> Result<()> {
    match cmd {
        Commands::Search(args) => search::run(args, config).await,
        Commands::Export(args) => export::run(args, config).await,
        Commands::Browse(args) => browse::run(args, config).await,
        Commands::Config(args) => config::run(args, config),
    }
}

/// Query, page and sort options shared by the table commands.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Search text (defaults to the configured default query)
    pub query: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Column to sort by (e.g. title, author_name, first_publish_year)
    #[arg(long, value_parser = parse_field)]
    pub sort: Option<Field>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl ViewArgs {
    pub fn params(&self, config: &Config) -> Result<QueryParameters> {
        let query = self.query.as_deref().unwrap_or(&config.default_query);
        let page_size = self.page_size.unwrap_or(config.page_size);
        QueryParameters::new(query, self.page - 1, page_size).context("Invalid query parameters")
    }

    pub fn sort_state(&self) -> SortState {
        let key = self.sort.unwrap_or(SortState::default().key);
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortState::new(key, direction)
    }
}

pub fn parse_field(s: &str) -> Result<Field, String> {
    s.parse().map_err(|e: shelfview_core::Error| e.to_string())
}

/// Build a table for `args` and wait for its first fetch.
pub async fn open_table(args: &ViewArgs, config: &Config) -> Result<(Table, CliSource)> {
    let source = CliSource::from_config(config)?;
    let mut table = Table::new(args.params(config)?);
    table.set_sort(args.sort_state());

    let request = table.reload();
    if table.apply_fetch(store::fetch(&source, request).await) == FetchStatus::Degraded {
        output::error(&format!(
            "Could not search {}; showing no records",
            source.describe()
        ));
    }

    Ok((table, source))
}
