//! Query parameters.

use serde::Serialize;

use crate::Result;
use crate::error::InvalidInputError;

/// What to fetch from the record source.
///
/// `page_index` is 0-based here; sources are 1-based (see [`source_page`](Self::source_page)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    search_query: String,
    page_index: u32,
    page_size: u32,
}

impl QueryParameters {
    /// Create query parameters, rejecting a zero page size.
    pub fn new(search_query: impl Into<String>, page_index: u32, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(InvalidInputError::PageSize.into());
        }
        Ok(Self {
            search_query: search_query.into(),
            page_index,
            page_size,
        })
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The 1-based page number sent to the record source.
    pub fn source_page(&self) -> u32 {
        self.page_index.saturating_add(1)
    }

    /// New search text; returns to the first page.
    pub fn with_search_query(&self, search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            page_index: 0,
            ..self.clone()
        }
    }

    /// Explicit page navigation; keeps everything else.
    pub fn with_page_index(&self, page_index: u32) -> Self {
        Self {
            page_index,
            ..self.clone()
        }
    }

    /// New page size; returns to the first page.
    pub fn with_page_size(&self, page_size: u32) -> Result<Self> {
        Self::new(self.search_query.clone(), 0, page_size)
    }
}
