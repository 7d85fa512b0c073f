//! Terminal table rendering.

use colored::Colorize;

use shelfview_core::{Field, Record, SortDirection, View};

/// Text shown for an absent value.
const MISSING: &str = "N/A";

/// Widest a column may grow before cells are truncated.
const MAX_WIDTH: usize = 28;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn header(view: &View, field: Field) -> String {
    if view.sort.key != field {
        return field.label().to_string();
    }
    let arrow = match view.sort.direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    };
    format!("{} {}", field.label(), arrow)
}

/// One table row. A `None` cell has no value in the record.
#[derive(Debug)]
struct Row {
    number: String,
    editing: bool,
    cells: Vec<Option<String>>,
}

/// The view laid out as columns, ready to print.
#[derive(Debug)]
struct Layout {
    headers: Vec<String>,
    widths: Vec<usize>,
    number_width: usize,
    rows: Vec<Row>,
    footer: String,
}

/// Lay out the view: header, rows, footer.
///
/// `scratch` replaces the record of the row being edited.
fn layout(view: &View, scratch: Option<&Record>, reported_total: u64) -> Layout {
    let headers: Vec<String> = Field::ALL.iter().map(|f| header(view, *f)).collect();

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            let record = match scratch {
                Some(scratch) if row.editing => scratch,
                _ => &row.record,
            };
            Row {
                number: (row.index + 1).to_string(),
                editing: row.editing,
                cells: Field::ALL
                    .iter()
                    .map(|f| record.cell(*f).map(|cell| truncate(&cell, MAX_WIDTH)))
                    .collect(),
            }
        })
        .collect();

    let number_width = rows
        .iter()
        .map(|r| r.number.len())
        .max()
        .unwrap_or(1)
        .max(1);
    let widths = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r.cells[i].as_deref().unwrap_or(MISSING).chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    Layout {
        headers,
        widths,
        number_width,
        rows,
        footer: footer(view, reported_total),
    }
}

impl Layout {
    fn header_line(&self) -> String {
        let head: Vec<String> = self
            .headers
            .iter()
            .zip(&self.widths)
            .map(|(h, w)| pad(h, *w))
            .collect();
        format!("{}  {}", pad("#", self.number_width), head.join("  "))
    }

    /// `missing` styles the padded text of cells without a value.
    fn row_line(&self, row: &Row, missing: impl Fn(String) -> String) -> String {
        let body: Vec<String> = row
            .cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, w)| match cell {
                Some(text) => pad(text, *w),
                None => missing(pad(MISSING, *w)),
            })
            .collect();
        let marker = if row.editing { " *" } else { "" };
        format!(
            "{}  {}{}",
            pad(&row.number, self.number_width),
            body.join("  "),
            marker
        )
    }

    /// Plain text lines: header, one per row, footer.
    #[cfg(test)]
    fn lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(self.header_line());
        out.extend(self.rows.iter().map(|row| self.row_line(row, |text| text)));
        out.push(self.footer.clone());
        out
    }
}

fn footer(view: &View, reported_total: u64) -> String {
    let page = view.page_index + 1;
    let first = view.rows.first().map(|r| r.index + 1);
    let last = view.rows.last().map(|r| r.index + 1);
    let range = match (first, last) {
        (Some(first), Some(last)) => format!("{}-{} of {}", first, last, view.total),
        _ => format!("0 of {}", view.total),
    };
    let mut footer = format!(
        "page {} · {} rows per page · {} · source reports {} matches",
        page, view.page_size, range, reported_total
    );
    if view.loading {
        footer.push_str(" · loading…");
    }
    footer
}

/// Print the view to stdout with colour.
pub fn print(view: &View, scratch: Option<&Record>, reported_total: u64) {
    let layout = layout(view, scratch, reported_total);

    println!("{}", layout.header_line().bold());
    for row in &layout.rows {
        if row.editing {
            println!("{}", layout.row_line(row, |text| text).yellow());
        } else {
            println!(
                "{}",
                layout.row_line(row, |text| text.dimmed().to_string())
            );
        }
    }
    println!("{}", layout.footer.dimmed());
}
