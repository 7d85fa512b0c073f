//! Record fields and their value shapes.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// One of the seven catalog record fields.
///
/// Declaration order is the display column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[serde(rename = "average_rating")]
    AverageRating,
    #[serde(rename = "author_name")]
    AuthorNames,
    Title,
    FirstPublishYear,
    #[serde(rename = "subject")]
    Subjects,
    AuthorBirthDate,
    AuthorTopWork,
}

impl Field {
    /// All fields, in column order.
    pub const ALL: [Field; 7] = [
        Field::AverageRating,
        Field::AuthorNames,
        Field::Title,
        Field::FirstPublishYear,
        Field::Subjects,
        Field::AuthorBirthDate,
        Field::AuthorTopWork,
    ];

    /// Canonical column name, used for CSV headers and CLI arguments.
    pub fn name(self) -> &'static str {
        match self {
            Field::AverageRating => "average_rating",
            Field::AuthorNames => "author_name",
            Field::Title => "title",
            Field::FirstPublishYear => "first_publish_year",
            Field::Subjects => "subject",
            Field::AuthorBirthDate => "author_birth_date",
            Field::AuthorTopWork => "author_top_work",
        }
    }

    /// Human-readable column label.
    pub fn label(self) -> &'static str {
        match self {
            Field::AverageRating => "rating",
            Field::AuthorNames => "author",
            Field::Title => "title",
            Field::FirstPublishYear => "first published",
            Field::Subjects => "subject",
            Field::AuthorBirthDate => "author born",
            Field::AuthorTopWork => "author top work",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts canonical names, camelCase names and Open Library wire keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "average_rating" | "averageRating" | "ratings_average" | "rating" => {
                Field::AverageRating
            }
            "author_name" | "authorNames" | "author_names" | "author" => Field::AuthorNames,
            "title" => Field::Title,
            "first_publish_year" | "firstPublishYear" | "year" => Field::FirstPublishYear,
            "subject" | "subjects" => Field::Subjects,
            "author_birth_date" | "authorBirthDate" => Field::AuthorBirthDate,
            "author_top_work" | "authorTopWork" => Field::AuthorTopWork,
            other => {
                return Err(InvalidInputError::Field {
                    name: other.to_string(),
                }
                .into());
            }
        };
        Ok(field)
    }
}

/// A borrowed, generic view of one field of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    List(&'a [String]),
    Number(f64),
    Integer(i64),
}

impl FieldValue<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}
