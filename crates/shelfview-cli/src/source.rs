//! CLI record source wrapper.

use anyhow::{Context, Result};
use async_trait::async_trait;

use shelfview_core::{RecordSource, SearchOutput};
use shelfview_file::FileSource;
use shelfview_openlibrary::OpenLibrarySource;

use crate::config::Config;

/// The record source selected by the configured URL.
#[derive(Debug)]
pub enum CliSource {
    File(FileSource),
    OpenLibrary(OpenLibrarySource),
}

impl CliSource {
    /// `file://` URLs read a local catalog; anything else talks to Open Library.
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config.source_url()?;
        let bindings = config.field_bindings()?;

        if url.is_local() {
            let path = url
                .to_file_path()
                .context("Failed to convert file:// URL to path")?;
            Ok(CliSource::File(FileSource::new(path).with_bindings(bindings)))
        } else {
            let source = OpenLibrarySource::with_timeout(url, config.timeout())
                .context("Failed to create HTTP client")?;
            Ok(CliSource::OpenLibrary(source.with_bindings(bindings)))
        }
    }
}

#[async_trait]
impl RecordSource for CliSource {
    async fn search(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> shelfview_core::Result<SearchOutput> {
        match self {
            CliSource::File(source) => source.search(query, page, limit).await,
            CliSource::OpenLibrary(source) => source.search(query, page, limit).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            CliSource::File(source) => source.describe(),
            CliSource::OpenLibrary(source) => source.describe(),
        }
    }
}
