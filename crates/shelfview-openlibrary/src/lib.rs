//! shelfview-openlibrary - Open Library backed record source.

mod client;
mod endpoints;
mod source;

pub use client::SearchClient;
pub use source::{OPEN_LIBRARY_URL, OpenLibrarySource};
