//! Catalog records.

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::Result;
use crate::error::InvalidInputError;
use crate::field::{Field, FieldValue};

/// One catalog entry as returned by a record source.
///
/// Every field is optional; absence is a normal state, not an error.
/// An empty list is the absent state for list fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "author_name", skip_serializing_if = "Vec::is_empty")]
    pub author_names: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i64>,

    #[serde(rename = "subject", skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_birth_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_top_work: Option<String>,
}

impl Record {
    /// Convenience constructor for a record carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Generic view of one field.
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        fn text(v: &Option<String>) -> FieldValue<'_> {
            v.as_deref().map_or(FieldValue::Missing, FieldValue::Text)
        }
        fn list(v: &[String]) -> FieldValue<'_> {
            if v.is_empty() {
                FieldValue::Missing
            } else {
                FieldValue::List(v)
            }
        }

        match field {
            Field::Title => text(&self.title),
            Field::AuthorNames => list(&self.author_names),
            Field::AverageRating => self
                .average_rating
                .map_or(FieldValue::Missing, FieldValue::Number),
            Field::FirstPublishYear => self
                .first_publish_year
                .map_or(FieldValue::Missing, FieldValue::Integer),
            Field::Subjects => list(&self.subjects),
            Field::AuthorBirthDate => text(&self.author_birth_date),
            Field::AuthorTopWork => text(&self.author_top_work),
        }
    }

    /// Display text for one field, or `None` when the field is absent.
    pub fn cell(&self, field: Field) -> Option<String> {
        match self.value(field) {
            FieldValue::Missing => None,
            FieldValue::Text(s) => Some(s.to_string()),
            FieldValue::List(items) => Some(items.join(", ")),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Integer(n) => Some(n.to_string()),
        }
    }

    /// Set one field from user-entered text.
    ///
    /// Empty input clears the field. List input is split on commas. Numeric
    /// fields must parse; on failure the record is left unchanged.
    pub fn set_text(&mut self, field: Field, input: &str) -> Result<()> {
        let input = input.trim();

        match field {
            Field::Title => self.title = text_input(input),
            Field::AuthorBirthDate => self.author_birth_date = text_input(input),
            Field::AuthorTopWork => self.author_top_work = text_input(input),
            Field::AuthorNames => self.author_names = list_input(input),
            Field::Subjects => self.subjects = list_input(input),
            Field::AverageRating => {
                self.average_rating = parse_input(field, input, |s| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .ok_or_else(|| "not a number".to_string())
                })?;
            }
            Field::FirstPublishYear => {
                self.first_publish_year =
                    parse_input(field, input, |s| s.parse::<i64>().map_err(|e| e.to_string()))?;
            }
        }

        Ok(())
    }
}

fn text_input(input: &str) -> Option<String> {
    (!input.is_empty()).then(|| input.to_string())
}

fn list_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_input<T>(
    field: Field,
    input: &str,
    parse: impl FnOnce(&str) -> std::result::Result<T, String>,
) -> Result<Option<T>> {
    if input.is_empty() {
        return Ok(None);
    }
    let value = parse(input).map_err(|reason| InvalidInputError::FieldValue {
        field,
        value: input.to_string(),
        reason,
    })?;
    Ok(Some(value))
}

/// Synthetic identity assigned to a record when a fetched batch is applied.
///
/// Sources guarantee no stable identity, so ids are only meaningful within
/// one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record held by the store, paired with its synthetic id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: RecordId,
    pub record: Record,
}

impl Entry {
    pub fn new(record: Record) -> Self {
        Self {
            id: RecordId::new(),
            record,
        }
    }
}
