//! Search command implementation.

use anyhow::Result;
use clap::Args;

use super::{ViewArgs, open_table};
use crate::config::Config;
use crate::{output, render};

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let (table, _source) = open_table(&args.view, config).await?;
    let view = table.view();

    if args.json {
        output::json(&view)?;
    } else {
        render::print(&view, None, table.store().reported_total());
    }

    Ok(())
}
