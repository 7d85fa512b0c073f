//! Windowing and projection.

use std::ops::Range;

use crate::record::Entry;

use super::sort::{SortState, sort_entries};

/// A page-sized window over the sorted sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// The slice of a `len`-long sequence this window covers, clipped.
    ///
    /// Out-of-range windows are empty.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }
}

/// The result of projecting a record batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    /// Entries on the current page, in sorted order.
    pub visible: Vec<&'a Entry>,
    /// Length of the whole sorted sequence (the held batch).
    pub total: usize,
    /// Position of `visible[0]` in the sorted sequence.
    pub offset: usize,
}

/// Sort the batch, then cut out the requested page.
///
/// Pure: identical inputs give identical output.
pub fn project(entries: &[Entry], sort: SortState, window: PageWindow) -> Projection<'_> {
    let sorted = sort_entries(entries, sort);
    let total = sorted.len();
    let range = window.range(total);
    let offset = range.start;

    Projection {
        visible: sorted[range].to_vec(),
        total,
        offset,
    }
}
