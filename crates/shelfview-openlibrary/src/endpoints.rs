//! Open Library search endpoint types.

use serde::{Deserialize, Serialize};

/// Query parameters for `search.json`.
#[derive(Debug, Serialize)]
pub(crate) struct SearchQuery<'a> {
    pub q: &'a str,
    pub page: u32,
    pub limit: u32,
}

/// Response body of `search.json`.
///
/// Documents are kept as raw JSON; field bindings decide what to read.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<serde_json::Value>,

    /// Open Library sends both `numFound` and `num_found`; only the former is read.
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
}

/// Error body some Open Library endpoints return.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<String>,
}
