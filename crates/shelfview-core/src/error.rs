//! Error types for shelfview.
//!
//! Every fallible operation in the core and in the record sources returns
//! this error type. The view-model itself never surfaces source failures to
//! the caller: the store degrades them to an empty batch (see
//! [`RecordStore::apply`](crate::store::RecordStore::apply)).

use std::fmt;
use thiserror::Error;

use crate::field::Field;

/// The unified error type for shelfview operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network or filesystem transport errors (connection, timeout, unreadable file).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The source answered, but not with something we understand.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (bad URL, unknown field, unparsable value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Writing an export failed.
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local I/O failure (file-backed sources).
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

/// Protocol-level errors from a record source.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code, if the source speaks HTTP.
    pub status: Option<u16>,
    /// Error message.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}", status)?,
            None => write!(f, "malformed response")?,
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: Option<u16>, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// A response body that could not be decoded.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(None, Some(message.into()))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid source URL.
    #[error("invalid source URL '{value}': {reason}")]
    SourceUrl { value: String, reason: String },

    /// Unknown record field name.
    #[error("unknown field '{name}'")]
    Field { name: String },

    /// A value that does not fit the field's shape.
    #[error("invalid value '{value}' for {field}: {reason}")]
    FieldValue {
        field: Field,
        value: String,
        reason: String,
    },

    /// Page size must be positive.
    #[error("page size must be at least 1")]
    PageSize,
}

/// Export sink errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    /// The destination could not be written.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(ExportError::Csv(err))
    }
}
