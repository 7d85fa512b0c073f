//! File-backed record source.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use shelfview_core::{Field, FieldBindings, RecordSource, Result, SearchOutput};

use crate::catalog::Catalog;

/// Fields whose text takes part in matching.
const SEARCHED_FIELDS: [Field; 4] = [
    Field::Title,
    Field::AuthorNames,
    Field::Subjects,
    Field::AuthorTopWork,
];

/// Offline record source that searches a JSON catalog file.
///
/// Matching is a case-insensitive substring test over titles, author names,
/// subjects and top works; a blank query matches everything. Paging follows
/// the Open Library API: `page` is 1-based and `num_found` counts all matches.
#[derive(Debug, Clone)]
pub struct FileSource {
    catalog: Catalog,
    bindings: FieldBindings,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            catalog: Catalog::new(path),
            bindings: FieldBindings::open_library(),
        }
    }

    /// Use different field bindings when reading documents.
    pub fn with_bindings(mut self, bindings: FieldBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn path(&self) -> &Path {
        self.catalog.path()
    }

    fn matches(&self, doc: &Value, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        SEARCHED_FIELDS
            .iter()
            .any(|field| match doc.get(self.bindings.key(*field)) {
                Some(Value::String(s)) => s.to_lowercase().contains(needle),
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|s| s.to_lowercase().contains(needle)),
                _ => false,
            })
    }
}

#[async_trait]
impl RecordSource for FileSource {
    #[instrument(skip(self), fields(path = %self.catalog.path().display()))]
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchOutput> {
        let docs = self.catalog.load().await?;
        let needle = query.trim().to_lowercase();

        let hits: Vec<&Value> = docs.iter().filter(|doc| self.matches(doc, &needle)).collect();
        let start = (page.max(1) as usize - 1).saturating_mul(limit as usize);

        let records = hits
            .iter()
            .skip(start)
            .take(limit as usize)
            .map(|doc| self.bindings.record_from_doc(doc))
            .collect::<Vec<_>>();
        debug!(hits = hits.len(), returned = records.len(), "catalog search");

        Ok(SearchOutput {
            records,
            num_found: hits.len() as u64,
        })
    }

    fn describe(&self) -> String {
        format!("file://{}", self.catalog.path().display())
    }
}
