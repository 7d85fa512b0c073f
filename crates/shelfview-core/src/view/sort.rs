//! Client-side sorting.

use std::cmp::Ordering;

use serde::Serialize;

use crate::field::{Field, FieldValue};
use crate::record::Entry;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub key: Field,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: Field, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// The state after clicking the header of `field`.
    ///
    /// Clicking the active ascending column flips it to descending; anything
    /// else sorts by `field` ascending.
    pub fn toggled(self, field: Field) -> Self {
        let direction = if self.key == field && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self::new(field, direction)
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::new(Field::Title, SortDirection::Ascending)
    }
}

/// Generic value comparison.
///
/// Returns `None` when either side is missing or the kinds differ. Lists
/// compare by their comma-joined text.
pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Option<Ordering> {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
        (FieldValue::List(a), FieldValue::List(b)) => Some(a.join(",").cmp(&b.join(","))),
        (FieldValue::Number(a), FieldValue::Number(b)) => Some(a.total_cmp(&b)),
        (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(&b)),
        (FieldValue::Number(a), FieldValue::Integer(b)) => Some(a.total_cmp(&(b as f64))),
        (FieldValue::Integer(a), FieldValue::Number(b)) => Some((a as f64).total_cmp(&b)),
        _ => None,
    }
}

/// Order entries by the sort state.
///
/// Entries whose sort value is missing keep their input positions; the
/// remaining entries are stably sorted into the other slots. Ties keep
/// input order in both directions.
pub fn sort_entries(entries: &[Entry], sort: SortState) -> Vec<&Entry> {
    let mut ordered: Vec<&Entry> = entries.iter().collect();

    let (slots, mut present): (Vec<usize>, Vec<&Entry>) = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.record.value(sort.key).is_missing())
        .unzip();

    present.sort_by(|a, b| {
        let ordering = compare_values(a.record.value(sort.key), b.record.value(sort.key))
            .unwrap_or(Ordering::Equal);
        sort.direction.apply(ordering)
    });

    for (slot, entry) in slots.into_iter().zip(present) {
        ordered[slot] = entry;
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn entries(titles: &[Option<&str>]) -> Vec<Entry> {
        titles
            .iter()
            .map(|t| {
                Entry::new(Record {
                    title: t.map(str::to_string),
                    ..Record::default()
                })
            })
            .collect()
    }

    fn titles(sorted: &[&Entry]) -> Vec<String> {
        sorted
            .iter()
            .map(|e| e.record.title.clone().unwrap_or_else(|| "-".to_string()))
            .collect()
    }

    #[test]
    fn sorts_titles_both_ways() {
        let entries = entries(&[Some("B"), Some("A"), Some("C")]);

        let asc = sort_entries(&entries, SortState::default());
        assert_eq!(titles(&asc), vec!["A", "B", "C"]);

        let desc = sort_entries(
            &entries,
            SortState::new(Field::Title, SortDirection::Descending),
        );
        assert_eq!(titles(&desc), vec!["C", "B", "A"]);
    }

    #[test]
    fn missing_values_hold_their_positions() {
        let entries = entries(&[Some("C"), None, Some("A"), None, Some("B")]);

        let asc = sort_entries(&entries, SortState::default());
        assert_eq!(titles(&asc), vec!["A", "-", "B", "-", "C"]);
        assert_eq!(asc[1].id, entries[1].id);
        assert_eq!(asc[3].id, entries[3].id);

        let desc = sort_entries(
            &entries,
            SortState::new(Field::Title, SortDirection::Descending),
        );
        assert_eq!(titles(&desc), vec!["C", "-", "B", "-", "A"]);
        assert_eq!(desc[1].id, entries[1].id);
        assert_eq!(desc[3].id, entries[3].id);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let entries = entries(&[Some("same"), Some("other"), Some("same")]);

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort_entries(&entries, SortState::new(Field::Title, direction));
            let same: Vec<_> = sorted
                .iter()
                .filter(|e| e.record.title.as_deref() == Some("same"))
                .map(|e| e.id)
                .collect();
            assert_eq!(same, vec![entries[0].id, entries[2].id]);
        }
    }

    #[test]
    fn sorts_numbers_numerically() {
        let entries: Vec<Entry> = [9, 10, 1000, 2]
            .into_iter()
            .map(|year| {
                Entry::new(Record {
                    first_publish_year: Some(year),
                    ..Record::default()
                })
            })
            .collect();

        let sorted = sort_entries(
            &entries,
            SortState::new(Field::FirstPublishYear, SortDirection::Ascending),
        );
        let years: Vec<_> = sorted
            .iter()
            .filter_map(|e| e.record.first_publish_year)
            .collect();
        assert_eq!(years, vec![2, 9, 10, 1000]);
    }

    #[test]
    fn lists_compare_by_joined_text() {
        let a = ["Austen".to_string()];
        let b = ["Austen".to_string(), "Bronte".to_string()];
        assert_eq!(
            compare_values(FieldValue::List(&a), FieldValue::List(&b)),
            Some(Ordering::Less)
        );
        assert_eq!(compare_values(FieldValue::Missing, FieldValue::List(&a)), None);
    }

    #[test]
    fn header_toggle_rule() {
        let state = SortState::default();

        let flipped = state.toggled(Field::Title);
        assert_eq!(flipped.direction, SortDirection::Descending);

        let back = flipped.toggled(Field::Title);
        assert_eq!(back.direction, SortDirection::Ascending);

        let other = flipped.toggled(Field::FirstPublishYear);
        assert_eq!(other, SortState::new(Field::FirstPublishYear, SortDirection::Ascending));
    }
}
