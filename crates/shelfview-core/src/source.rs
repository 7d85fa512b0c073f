//! Record source trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::record::Record;

/// One page of search results from a record source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutput {
    /// The records in this page.
    pub records: Vec<Record>,

    /// The source's own count of matching records across all pages.
    pub num_found: u64,
}

impl SearchOutput {
    /// The substitute result for a failed search.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// An external catalog search service.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Search the catalog.
    ///
    /// `page` is 1-based, as in the Open Library API.
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchOutput>;

    /// Short description of the source for logs and status lines.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: RecordSource + ?Sized> RecordSource for &T {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchOutput> {
        (**self).search(query, page, limit).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[async_trait]
impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchOutput> {
        (**self).search(query, page, limit).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[async_trait]
impl<T: RecordSource + ?Sized> RecordSource for Arc<T> {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchOutput> {
        (**self).search(query, page, limit).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
