//! Record store.
//!
//! Holds the most recently fetched batch and the pending query parameters.
//! The store never performs I/O: [`RecordStore::set_query`] hands out a
//! [`FetchRequest`] tagged with a monotonically increasing sequence number,
//! the caller runs it through [`fetch`], and [`RecordStore::apply`] accepts
//! the completion only if no newer request has been issued since.

use tracing::{debug, instrument, warn};

use crate::Result;
use crate::query::QueryParameters;
use crate::record::{Entry, Record, RecordId};
use crate::source::{RecordSource, SearchOutput};

/// A fetch the store wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    seq: u64,
    params: QueryParameters,
}

impl FetchRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn params(&self) -> &QueryParameters {
        &self.params
    }
}

/// The outcome of a fetch, ready to hand back to the store.
#[derive(Debug)]
pub struct FetchCompletion {
    seq: u64,
    result: Result<SearchOutput>,
}

impl FetchCompletion {
    pub fn new(request: &FetchRequest, result: Result<SearchOutput>) -> Self {
        Self {
            seq: request.seq,
            result,
        }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What [`RecordStore::apply`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The batch replaced the held records.
    Applied,
    /// The source failed; the held records were replaced with an empty batch.
    Degraded,
    /// A newer request was issued; the completion was discarded.
    Stale,
}

impl FetchStatus {
    /// True if the held record list was replaced.
    pub fn replaced(self) -> bool {
        !matches!(self, FetchStatus::Stale)
    }
}

/// Run one fetch against a record source.
///
/// The source is called with the 1-based page number.
pub async fn fetch<S>(source: &S, request: FetchRequest) -> FetchCompletion
where
    S: RecordSource + ?Sized,
{
    let params = &request.params;
    debug!(
        seq = request.seq,
        query = params.search_query(),
        page = params.source_page(),
        limit = params.page_size(),
        source = %source.describe(),
        "fetching records"
    );
    let result = source
        .search(params.search_query(), params.source_page(), params.page_size())
        .await;
    FetchCompletion::new(&request, result)
}

/// Owner of the fetched record list and the query parameters.
#[derive(Debug)]
pub struct RecordStore {
    query: QueryParameters,
    entries: Vec<Entry>,
    reported_total: u64,
    issued: u64,
    generation: u64,
}

impl RecordStore {
    /// An empty store; nothing is fetched until [`set_query`](Self::set_query).
    pub fn new(query: QueryParameters) -> Self {
        Self {
            query,
            entries: Vec::new(),
            reported_total: 0,
            issued: 0,
            generation: 0,
        }
    }

    /// Record new query parameters and issue a fetch request for them.
    ///
    /// Any request issued earlier becomes stale.
    #[instrument(skip(self), fields(query = params.search_query()))]
    pub fn set_query(&mut self, params: QueryParameters) -> FetchRequest {
        self.issued += 1;
        self.query = params.clone();
        debug!(seq = self.issued, "issued fetch request");
        FetchRequest {
            seq: self.issued,
            params,
        }
    }

    /// Apply a fetch completion, last write wins.
    #[instrument(skip(self, completion), fields(seq = completion.seq))]
    pub fn apply(&mut self, completion: FetchCompletion) -> FetchStatus {
        if completion.seq != self.issued {
            debug!(latest = self.issued, "discarding stale fetch result");
            return FetchStatus::Stale;
        }

        self.generation = completion.seq;

        let (output, status) = match completion.result {
            Ok(output) => (output, FetchStatus::Applied),
            Err(e) => {
                warn!(error = %e, "record source unavailable, showing empty batch");
                (SearchOutput::empty(), FetchStatus::Degraded)
            }
        };

        debug!(
            records = output.records.len(),
            num_found = output.num_found,
            "replacing record batch"
        );
        self.entries = output.records.into_iter().map(Entry::new).collect();
        self.reported_total = output.num_found;
        status
    }

    /// Overwrite the record with the given id. Returns false if no such record is held.
    pub fn replace(&mut self, id: RecordId, record: Record) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.record = record;
                true
            }
            None => false,
        }
    }

    /// The held records, in fetch order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The most recently requested query parameters.
    pub fn query(&self) -> &QueryParameters {
        &self.query
    }

    /// True while the latest issued request has not been applied.
    pub fn is_loading(&self) -> bool {
        self.generation != self.issued
    }

    /// Sequence number of the request whose result is currently held (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The source's `numFound` for the held batch.
    ///
    /// Informational only; pagination counts the held batch.
    pub fn reported_total(&self) -> u64 {
        self.reported_total
    }
}
