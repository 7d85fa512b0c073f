//! CLI configuration.
//!
//! Settings come from `config.json` in the platform config directory (or
//! the file named by `SHELFVIEW_CONFIG`). Every key is optional. The record
//! source can be overridden with `SHELFVIEW_SOURCE` and then `--source`.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use shelfview_core::{DEFAULT_EXPORT_FILE, FieldBindings, SourceUrl};
use shelfview_openlibrary::OPEN_LIBRARY_URL;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "SHELFVIEW_CONFIG";

/// Environment variable overriding the record source URL.
pub const SOURCE_ENV: &str = "SHELFVIEW_SOURCE";

/// Effective settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record source URL (`https://…` or `file:///…`).
    pub source: String,
    /// Query used when a command is given none.
    pub default_query: String,
    /// Rows per page.
    pub page_size: u32,
    /// Export destination when none is given.
    pub export_file: PathBuf,
    /// Network request timeout; unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
    /// Field name → document key overrides.
    pub bindings: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: OPEN_LIBRARY_URL.to_string(),
            default_query: "harry potter".to_string(),
            page_size: 10,
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            timeout_secs: None,
            bindings: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the config file (defaults if absent), then apply overrides.
    pub fn load(source_flag: Option<&str>) -> Result<Self> {
        let path = config_path()?;

        let mut config = if path.exists() {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(source) = std::env::var(SOURCE_ENV) {
            config.source = source;
        }
        if let Some(source) = source_flag {
            config.source = source.to_string();
        }

        if config.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }

        Ok(config)
    }

    pub fn source_url(&self) -> Result<SourceUrl> {
        SourceUrl::new(&self.source).context("Invalid source URL")
    }

    pub fn field_bindings(&self) -> Result<FieldBindings> {
        FieldBindings::from_overrides(&self.bindings).context("Invalid field bindings")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Location of the config file.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let dirs =
        ProjectDirs::from("", "", "shelfview").context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.json"))
}
