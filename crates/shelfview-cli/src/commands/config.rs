//! Config command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use shelfview_core::Field;

use crate::config::{Config, config_path};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective settings as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs, config: &Config) -> Result<()> {
    if args.json {
        return output::json(config);
    }

    let path = config_path()?;
    let note = if path.exists() { "" } else { " (not present, using defaults)" };
    output::field("Config file", &format!("{}{}", path.display(), note.dimmed()));
    output::field("Source", &config.source);
    output::field("Default query", &config.default_query);
    output::field("Page size", &config.page_size.to_string());
    output::field("Export file", &config.export_file.display().to_string());
    output::field(
        "Timeout",
        &config
            .timeout_secs
            .map_or_else(|| "none".to_string(), |s| format!("{}s", s)),
    );

    let bindings = config.field_bindings()?;
    println!();
    println!("{}", "Field bindings".bold());
    for field in Field::ALL {
        output::field(&format!("  {}", field.name()), bindings.key(field));
    }

    Ok(())
}
