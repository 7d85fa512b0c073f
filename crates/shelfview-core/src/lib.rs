//! shelfview-core - Record view-model for catalog search results.
//!
//! Takes a fetched batch of catalog records plus user-driven view parameters
//! (search text, sort column and direction, page, page size, in-progress
//! edits) and derives what should be displayed, independent of any
//! rendering technology.
//!
//! # Example
//!
//! ```no_run
//! use shelfview_core::{Field, QueryParameters, RecordSource, Table, store};
//!
//! # async fn example(source: impl RecordSource) -> shelfview_core::Result<()> {
//! let mut table = Table::new(QueryParameters::new("harry potter", 0, 10)?);
//!
//! let request = table.reload();
//! table.apply_fetch(store::fetch(&source, request).await);
//!
//! table.toggle_sort(Field::FirstPublishYear);
//! for row in table.view().rows {
//!     println!("{}: {:?}", row.index, row.record.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bindings;
pub mod edit;
pub mod error;
pub mod export;
pub mod field;
pub mod query;
pub mod record;
pub mod source;
pub mod source_url;
pub mod store;
pub mod table;
pub mod view;

pub use bindings::FieldBindings;
pub use edit::EditSession;
pub use error::Error;
pub use export::{DEFAULT_EXPORT_FILE, ExportScope};
pub use field::{Field, FieldValue};
pub use query::QueryParameters;
pub use record::{Entry, Record, RecordId};
pub use source::{RecordSource, SearchOutput};
pub use source_url::SourceUrl;
pub use store::{FetchCompletion, FetchRequest, FetchStatus, RecordStore};
pub use table::{Row, Table, View};
pub use view::{SortDirection, SortState};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
