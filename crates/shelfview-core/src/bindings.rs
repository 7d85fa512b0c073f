//! Mapping between record fields and source document keys.
//!
//! Sources return loosely shaped JSON documents. Which key feeds which
//! [`Field`] is configuration: the Open Library search API, for example,
//! reports ratings as `ratings_average`, while older clients read
//! `average_rating`. Extraction is lenient: a key that is missing or holds
//! the wrong JSON type yields an absent field, never an error.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::Result;
use crate::field::Field;
use crate::record::Record;

/// Field-to-key bindings used when turning source documents into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBindings {
    keys: HashMap<Field, String>,
}

impl FieldBindings {
    /// Bindings for Open Library `search.json` documents.
    pub fn open_library() -> Self {
        let keys = Field::ALL
            .into_iter()
            .map(|field| {
                let key = match field {
                    Field::AverageRating => "ratings_average",
                    other => other.name(),
                };
                (field, key.to_string())
            })
            .collect();
        Self { keys }
    }

    /// Build bindings from configuration overrides on top of the Open Library defaults.
    ///
    /// Override keys are field names in any spelling [`Field`] accepts.
    pub fn from_overrides(overrides: &BTreeMap<String, String>) -> Result<Self> {
        let mut bindings = Self::open_library();
        for (field, key) in overrides {
            bindings = bindings.with(field.parse()?, key.clone());
        }
        Ok(bindings)
    }

    /// Bind `field` to a different document key.
    pub fn with(mut self, field: Field, key: impl Into<String>) -> Self {
        self.keys.insert(field, key.into());
        self
    }

    /// The document key bound to `field`.
    pub fn key(&self, field: Field) -> &str {
        self.keys
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.name())
    }

    /// Extract a record from one source document.
    pub fn record_from_doc(&self, doc: &Value) -> Record {
        let get = |field: Field| doc.get(self.key(field));
        let text = |field: Field| get(field).and_then(as_text);
        let list = |field: Field| get(field).map(as_list).unwrap_or_default();

        Record {
            title: text(Field::Title),
            author_names: list(Field::AuthorNames),
            average_rating: get(Field::AverageRating)
                .and_then(Value::as_f64)
                .filter(|n| n.is_finite()),
            first_publish_year: get(Field::FirstPublishYear).and_then(as_integer),
            subjects: list(Field::Subjects),
            author_birth_date: text(Field::AuthorBirthDate),
            author_top_work: text(Field::AuthorTopWork),
        }
    }
}

impl Default for FieldBindings {
    fn default() -> Self {
        Self::open_library()
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A JSON array keeps its string members; a bare string is a one-element list.
fn as_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(as_text).collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.fract() == 0.0 && n.is_finite())
            .map(|n| n as i64)
    })
}
