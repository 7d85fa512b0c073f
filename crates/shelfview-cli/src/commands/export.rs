//! Export command implementation.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use shelfview_core::ExportScope;

use super::{ViewArgs, open_table};
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file, or `-` for stdout (defaults to the configured export file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export only the selected page, in sorted order
    #[arg(long)]
    pub visible: bool,
}

pub async fn run(args: ExportArgs, config: &Config) -> Result<()> {
    let (table, _source) = open_table(&args.view, config).await?;

    let scope = if args.visible {
        ExportScope::Visible
    } else {
        ExportScope::Batch
    };
    let path = args.output.unwrap_or_else(|| config.export_file.clone());

    if path.as_os_str() == "-" {
        table
            .export_csv(io::stdout().lock(), scope)
            .context("Failed to write CSV")?;
        return Ok(());
    }

    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = table
        .export_csv(BufWriter::new(file), scope)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output::success(&format!("Exported {} records to {}", count, path.display()));
    Ok(())
}
