//! Mock search tests for the Open Library source.
//!
//! These tests use wiremock to simulate the search API and check request
//! shape, document mapping and failure handling without network access.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelfview_core::store::{self, FetchCompletion};
use shelfview_core::{
    Error, Field, FieldBindings, FetchStatus, QueryParameters, RecordSource, SourceUrl, Table,
};
use shelfview_openlibrary::OpenLibrarySource;

fn mock_url(server: &MockServer) -> SourceUrl {
    SourceUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn source(server: &MockServer) -> OpenLibrarySource {
    OpenLibrarySource::new(mock_url(server)).unwrap()
}

fn hobbit_doc() -> serde_json::Value {
    json!({
        "key": "/works/OL27482W",
        "title": "The Hobbit",
        "author_name": ["J.R.R. Tolkien"],
        "ratings_average": 4.2,
        "first_publish_year": 1937,
        "subject": ["Fantasy", "Dragons"]
    })
}

// ============================================================================
// Request and mapping
// ============================================================================

#[tokio::test]
async fn test_search_sends_query_page_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "the lord of the rings"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numFound": 120,
            "num_found": 120,
            "start": 50,
            "docs": [hobbit_doc()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = source(&server)
        .search("the lord of the rings", 2, 50)
        .await
        .unwrap();

    assert_eq!(output.num_found, 120);
    assert_eq!(output.records.len(), 1);

    let record = &output.records[0];
    assert_eq!(record.title.as_deref(), Some("The Hobbit"));
    assert_eq!(record.author_names, vec!["J.R.R. Tolkien"]);
    assert_eq!(record.average_rating, Some(4.2));
    assert_eq!(record.first_publish_year, Some(1937));
    assert_eq!(record.cell(Field::Subjects).as_deref(), Some("Fantasy, Dragons"));
}

#[tokio::test]
async fn test_rating_binding_is_configurable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numFound": 1,
            "docs": [{ "title": "Emma", "average_rating": 3.9 }]
        })))
        .mount(&server)
        .await;

    let default = source(&server).search("emma", 1, 10).await.unwrap();
    assert_eq!(default.records[0].cell(Field::AverageRating), None);

    let rebound = source(&server)
        .with_bindings(FieldBindings::open_library().with(Field::AverageRating, "average_rating"));
    let output = rebound.search("emma", 1, 10).await.unwrap();
    assert_eq!(output.records[0].cell(Field::AverageRating).as_deref(), Some("3.9"));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "service unavailable"
        })))
        .mount(&server)
        .await;

    let err = source(&server).search("x", 1, 10).await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)));
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("service unavailable"));
}

#[tokio::test]
async fn test_malformed_body_is_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = source(&server).search("x", 1, 10).await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "numFound": 0, "docs": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let source =
        OpenLibrarySource::with_timeout(mock_url(&server), Some(Duration::from_millis(100)))
            .unwrap();
    let err = source.search("x", 1, 10).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_failed_search_degrades_table_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = source(&server);
    let mut table = Table::new(QueryParameters::new("anything", 0, 10).unwrap());
    let request = table.reload();
    let status = table.apply_fetch(store::fetch(&source, request).await);

    assert_eq!(status, FetchStatus::Degraded);
    let view = table.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.total, 0);
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test]
async fn test_slow_superseded_search_is_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "tolkien"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "numFound": 1, "docs": [hobbit_doc()] }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "rowling"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numFound": 1,
            "docs": [{ "title": "Harry Potter and the Philosopher's Stone" }]
        })))
        .mount(&server)
        .await;

    let source = Arc::new(source(&server));
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchCompletion>();
    let mut table = Table::new(QueryParameters::new("", 0, 10).unwrap());

    for query in ["tolkien", "rowling"] {
        let request = table.set_search_query(query).unwrap();
        let source = Arc::clone(&source);
        let tx = tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(store::fetch(&*source, request).await);
        });
    }
    drop(tx);

    let mut statuses = Vec::new();
    while let Some(completion) = rx.recv().await {
        statuses.push(table.apply_fetch(completion));
    }

    assert_eq!(statuses, vec![FetchStatus::Applied, FetchStatus::Stale]);
    let view = table.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(
        view.rows[0].record.title.as_deref(),
        Some("Harry Potter and the Philosopher's Stone")
    );
}
