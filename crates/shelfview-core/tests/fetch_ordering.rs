//! Fetch ordering tests.
//!
//! These drive a [`Table`] the way an event loop would: fetches run as
//! spawned tasks and their completions come back over a channel in whatever
//! order they resolve.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use shelfview_core::error::TransportError;
use shelfview_core::store::{self, FetchCompletion};
use shelfview_core::{
    Field, FetchRequest, FetchStatus, QueryParameters, Record, RecordSource, Result, SearchOutput,
    Table,
};

/// A source whose searches block until the test releases them.
#[derive(Default)]
struct GatedSource {
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<(String, u32, u32)>>,
}

impl GatedSource {
    fn gate(&self, query: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }
}

#[async_trait]
impl RecordSource for GatedSource {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<SearchOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), page, limit));

        let gate = self.gates.lock().unwrap().remove(query);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if query == "offline" {
            return Err(TransportError::Connection {
                message: "unreachable".to_string(),
            }
            .into());
        }

        Ok(SearchOutput {
            records: vec![Record::titled(format!("{query} page {page}"))],
            num_found: 1,
        })
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

fn spawn_fetch(
    source: &Arc<GatedSource>,
    request: FetchRequest,
    tx: &mpsc::UnboundedSender<FetchCompletion>,
) {
    let source = Arc::clone(source);
    let tx = tx.clone();
    tokio::spawn(async move {
        let completion = store::fetch(&*source, request).await;
        let _ = tx.send(completion);
    });
}

fn titles(table: &Table) -> Vec<String> {
    table
        .view()
        .rows
        .into_iter()
        .filter_map(|r| r.record.title)
        .collect()
}

#[tokio::test]
async fn later_request_wins_even_when_earlier_resolves_last() {
    let source = Arc::new(GatedSource::default());
    let release_tolkien = source.gate("tolkien");
    let release_rowling = source.gate("rowling");
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut table = Table::new(QueryParameters::new("", 0, 10).unwrap());
    let tolkien = table.set_search_query("tolkien").unwrap();
    let rowling = table.set_search_query("rowling").unwrap();
    spawn_fetch(&source, tolkien, &tx);
    spawn_fetch(&source, rowling, &tx);

    release_rowling.send(()).unwrap();
    let first = rx.recv().await.unwrap();
    assert_eq!(table.apply_fetch(first), FetchStatus::Applied);
    assert_eq!(titles(&table), vec!["rowling page 1"]);

    release_tolkien.send(()).unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(table.apply_fetch(second), FetchStatus::Stale);
    assert_eq!(titles(&table), vec!["rowling page 1"]);
}

#[tokio::test]
async fn view_operations_do_not_wait_for_pending_fetch() {
    let source = Arc::new(GatedSource::default());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut table = Table::new(QueryParameters::new("dune", 0, 10).unwrap());
    let request = table.reload();
    spawn_fetch(&source, request, &tx);
    table.apply_fetch(rx.recv().await.unwrap());

    let _never_released = source.gate("stuck");
    let pending = table.set_search_query("stuck").unwrap();
    spawn_fetch(&source, pending, &tx);

    table.toggle_sort(Field::Title);
    assert!(table.begin_edit(0));
    table.update_edit(Field::Title, "Dune (edited)").unwrap();
    assert!(table.commit_edit().is_some());

    let view = table.view();
    assert!(view.loading);
    assert_eq!(titles(&table), vec!["Dune (edited)"]);
}

#[tokio::test]
async fn page_index_is_sent_one_based() {
    let source = Arc::new(GatedSource::default());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut table = Table::new(QueryParameters::new("emma", 0, 25).unwrap());
    spawn_fetch(&source, table.reload(), &tx);
    table.apply_fetch(rx.recv().await.unwrap());
    spawn_fetch(&source, table.set_page(2).unwrap(), &tx);
    table.apply_fetch(rx.recv().await.unwrap());

    let calls = source.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![("emma".to_string(), 1, 25), ("emma".to_string(), 3, 25)]
    );
}

#[tokio::test]
async fn unavailable_source_yields_empty_view() {
    let source = Arc::new(GatedSource::default());
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut table = Table::new(QueryParameters::new("offline", 0, 10).unwrap());
    spawn_fetch(&source, table.reload(), &tx);

    assert_eq!(
        table.apply_fetch(rx.recv().await.unwrap()),
        FetchStatus::Degraded
    );
    let view = table.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.total, 0);
}
