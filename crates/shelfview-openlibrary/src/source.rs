//! Open Library backed record source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use shelfview_core::{FieldBindings, RecordSource, Result, SearchOutput, SourceUrl};

use crate::client::SearchClient;

/// Base URL of the public Open Library service.
pub const OPEN_LIBRARY_URL: &str = "https://openlibrary.org";

/// A network record source using the Open Library search API.
#[derive(Debug, Clone)]
pub struct OpenLibrarySource {
    client: SearchClient,
    bindings: FieldBindings,
}

impl OpenLibrarySource {
    /// Create a source for the given base URL, with no request timeout.
    pub fn new(url: SourceUrl) -> Result<Self> {
        Self::with_timeout(url, None)
    }

    /// Create a source whose requests give up after `timeout`.
    pub fn with_timeout(url: SourceUrl, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: SearchClient::new(url, timeout)?,
            bindings: FieldBindings::open_library(),
        })
    }

    /// Use different field bindings when reading documents.
    pub fn with_bindings(mut self, bindings: FieldBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Returns the base URL for this source.
    pub fn url(&self) -> &SourceUrl {
        self.client.base()
    }
}

#[async_trait]
impl RecordSource for OpenLibrarySource {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchOutput> {
        let response = self.client.search(query, page, limit).await?;
        debug!(
            docs = response.docs.len(),
            num_found = response.num_found,
            "search complete"
        );

        let records = response
            .docs
            .iter()
            .map(|doc| self.bindings.record_from_doc(doc))
            .collect();

        Ok(SearchOutput {
            records,
            num_found: response.num_found,
        })
    }

    fn describe(&self) -> String {
        self.url().to_string()
    }
}
