//! Log view error types.

use thiserror::Error;

/// Boxed error produced by an item source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Log view operation errors.
#[derive(Error, Debug)]
pub enum LogViewError {
    /// Mutation attempted on a read-only projection
    #[error("Operation '{operation}' is not supported on a read-only sequence")]
    Unsupported { operation: &'static str },

    /// Index outside of the sequence bounds
    #[error("Index {index} out of range (count: {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Field descriptor violates the line bounds or overlaps its predecessor
    #[error(
        "Field {index} (start={start}, length={length}) is invalid for line of length {line_length}"
    )]
    InvalidField {
        index: usize,
        start: i32,
        length: i32,
        line_length: i32,
    },

    /// Line does not fit the cell width of a record
    #[error("Line of {length} storage units exceeds the record cell range")]
    LineTooLong { length: usize },

    /// Parser output does not match the line format schema
    #[error("Component count mismatch: expected {expected}, got {got}")]
    ComponentCountMismatch { expected: usize, got: usize },

    /// The underlying item source failed to produce a range
    #[error("Item source failed: {0}")]
    Source(#[source] SourceError),

    /// Malformed line format description
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading log data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogViewError {
    /// Wraps an arbitrary source failure.
    pub fn from_source<E>(err: E) -> Self
    where
        E: Into<SourceError>,
    {
        LogViewError::Source(err.into())
    }
}
