//! The table view-model.
//!
//! [`Table`] is the single owned state object behind the presentation layer:
//! it owns the [`RecordStore`], the sort state and the [`EditSession`], and
//! every user action is a method on it. Actions that change what should be
//! fetched return a [`FetchRequest`]; the caller performs it (see
//! [`fetch`](crate::store::fetch)) and hands the completion back through
//! [`Table::apply_fetch`]. Everything else is synchronous and works against
//! the last applied batch, even while a fetch is outstanding.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::edit::EditSession;
use crate::export::{ExportScope, write_csv};
use crate::field::Field;
use crate::query::QueryParameters;
use crate::record::{Record, RecordId};
use crate::store::{FetchCompletion, FetchRequest, FetchStatus, RecordStore};
use crate::view::{PageWindow, Projection, SortState, project, sort_entries};

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Position in the full sorted sequence; pass this to [`Table::begin_edit`].
    pub index: usize,
    pub id: RecordId,
    pub record: Record,
    pub editing: bool,
}

/// Everything the presentation layer needs to draw the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub rows: Vec<Row>,
    /// Number of records in the held batch.
    pub total: usize,
    pub page_index: u32,
    pub page_size: u32,
    pub sort: SortState,
    /// Sorted-view index of the row being edited.
    pub editing: Option<usize>,
    pub loading: bool,
}

/// Searchable, sortable, paginated, editable view over fetched records.
#[derive(Debug)]
pub struct Table {
    store: RecordStore,
    sort: SortState,
    edit: EditSession,
}

impl Table {
    /// A table for `params`; call [`reload`](Self::reload) to issue the first fetch.
    pub fn new(params: QueryParameters) -> Self {
        Self {
            store: RecordStore::new(params),
            sort: SortState::default(),
            edit: EditSession::new(),
        }
    }

    /// Issue a fetch for the current query parameters.
    pub fn reload(&mut self) -> FetchRequest {
        let params = self.store.query().clone();
        self.store.set_query(params)
    }

    /// Replace the query parameters. Returns `None` if nothing changed.
    pub fn set_query(&mut self, params: QueryParameters) -> Option<FetchRequest> {
        if &params == self.store.query() {
            return None;
        }
        Some(self.store.set_query(params))
    }

    /// New search text; returns to the first page.
    pub fn set_search_query(&mut self, search_query: impl Into<String>) -> Option<FetchRequest> {
        let params = self.store.query().with_search_query(search_query);
        self.set_query(params)
    }

    /// Navigate to a page (0-based).
    pub fn set_page(&mut self, page_index: u32) -> Option<FetchRequest> {
        let params = self.store.query().with_page_index(page_index);
        self.set_query(params)
    }

    /// New page size; returns to the first page. Zero is rejected.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<Option<FetchRequest>> {
        let params = self.store.query().with_page_size(page_size)?;
        Ok(self.set_query(params))
    }

    /// Hand a fetch completion back to the store.
    ///
    /// When the batch is replaced, any edit in progress is dropped.
    pub fn apply_fetch(&mut self, completion: FetchCompletion) -> FetchStatus {
        let status = self.store.apply(completion);
        if status.replaced() && self.edit.cancel() {
            debug!("edit session ended by re-fetch");
        }
        status
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Column-header click on `field`.
    pub fn toggle_sort(&mut self, field: Field) {
        self.set_sort(self.sort.toggled(field));
    }

    /// Change the sort state. An edit in progress ends without committing.
    pub fn set_sort(&mut self, sort: SortState) {
        if sort == self.sort {
            return;
        }
        self.sort = sort;
        if self.edit.cancel() {
            debug!("edit session ended by sort change");
        }
    }

    /// Start editing the record at `index` in the sorted view.
    ///
    /// Returns false (and changes nothing) if `index` is out of range.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        let sorted = sort_entries(self.store.entries(), self.sort);
        match sorted.get(index) {
            Some(entry) => {
                self.edit.begin(index, entry, self.store.generation());
                true
            }
            None => false,
        }
    }

    /// Set one field of the record being edited. `Ok(false)` if none is.
    pub fn update_edit(&mut self, field: Field, value: &str) -> Result<bool> {
        self.edit.update(field, value)
    }

    /// Write the edited record back into the store.
    ///
    /// Returns the committed record, or `None` if no edit was active.
    pub fn commit_edit(&mut self) -> Option<Record> {
        let committed = self.edit.commit()?;

        if committed.generation != self.store.generation()
            || !self.store.replace(committed.id, committed.record.clone())
        {
            debug!(index = committed.index, "edited record no longer held");
            return None;
        }

        debug!(index = committed.index, id = %committed.id, "committed edit");
        Some(committed.record)
    }

    /// Drop the edit in progress. Returns true if one was active.
    pub fn cancel_edit(&mut self) -> bool {
        self.edit.cancel()
    }

    /// The scratch copy of the record being edited.
    pub fn edit_scratch(&self) -> Option<&Record> {
        self.edit.scratch()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.edit.active_index()
    }

    /// Overwrite the record at `index` in the sorted view.
    pub fn replace_record(&mut self, index: usize, record: Record) -> bool {
        let id = match sort_entries(self.store.entries(), self.sort).get(index) {
            Some(entry) => entry.id,
            None => return false,
        };
        self.store.replace(id, record)
    }

    fn projection(&self) -> Projection<'_> {
        let query = self.store.query();
        let window = PageWindow::new(query.page_index() as usize, query.page_size() as usize);
        project(self.store.entries(), self.sort, window)
    }

    /// The current page as the presentation layer should draw it.
    pub fn view(&self) -> View {
        let projection = self.projection();
        let editing = self.edit.active_id();
        let query = self.store.query();

        let rows = projection
            .visible
            .iter()
            .enumerate()
            .map(|(i, entry)| Row {
                index: projection.offset + i,
                id: entry.id,
                record: entry.record.clone(),
                editing: editing == Some(entry.id),
            })
            .collect();

        View {
            rows,
            total: projection.total,
            page_index: query.page_index(),
            page_size: query.page_size(),
            sort: self.sort,
            editing: self.edit.active_index(),
            loading: self.store.is_loading(),
        }
    }

    /// Write the records in `scope` as CSV.
    pub fn export_csv<W: Write>(&self, writer: W, scope: ExportScope) -> Result<usize> {
        match scope {
            ExportScope::Batch => {
                write_csv(writer, self.store.entries().iter().map(|e| &e.record))
            }
            ExportScope::Visible => {
                let projection = self.projection();
                write_csv(writer, projection.visible.into_iter().map(|e| &e.record))
            }
        }
    }

    pub fn query(&self) -> &QueryParameters {
        self.store.query()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}
