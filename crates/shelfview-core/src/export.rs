//! CSV export.

use std::io::Write;

use tracing::debug;

use crate::Result;
use crate::error::ExportError;
use crate::field::Field;
use crate::record::Record;

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_FILE: &str = "books.csv";

/// Which records an export covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportScope {
    /// The whole held batch, in fetch order.
    #[default]
    Batch,
    /// The current page, in sorted order.
    Visible,
}

/// Write records as CSV: a header row of field names, then one row per record.
///
/// Missing values are empty cells; lists are joined with `", "`. Returns the
/// number of records written.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(Field::ALL.map(Field::name))?;

    let mut count = 0;
    for record in records {
        wtr.write_record(Field::ALL.map(|field| record.cell(field).unwrap_or_default()))?;
        count += 1;
    }

    wtr.flush().map_err(ExportError::Io)?;
    debug!(records = count, "wrote csv export");
    Ok(count)
}
