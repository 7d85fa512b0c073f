//! View projection.
//!
//! Pure functions from a record batch plus sort and page state to what
//! should be displayed. Pagination windows the held batch, not a
//! server-side offset.

mod project;
mod sort;

pub use project::{PageWindow, Projection, project};
pub use sort::{SortDirection, SortState, compare_values, sort_entries};
