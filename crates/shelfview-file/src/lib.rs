//! shelfview-file - Offline JSON catalog source.

mod catalog;
mod source;

pub use catalog::Catalog;
pub use source::FileSource;
