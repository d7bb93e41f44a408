//! Error types.
//!
//! Most failure modes of the engine are *recoverable locally* (an unresolvable fragment is dropped,
//! a malformed payload yields zero operations). The types here cover the remaining cases: misuse of
//! the position model, strict payload parsing, and configuration loading.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Misuse of the text position model (a caller bug, not a recoverable condition).
pub enum PositionError {
    #[error("offset {offset} is outside the buffer (length {len})")]
    /// A character offset lies past the end of the buffer.
    OffsetOutOfBounds {
        /// The rejected offset.
        offset: usize,
        /// Buffer length in characters.
        len: usize,
    },

    #[error("line {line} is outside the buffer ({line_count} lines)")]
    /// A line number does not exist in the buffer.
    LineOutOfBounds {
        /// The rejected line.
        line: usize,
        /// Number of lines in the buffer.
        line_count: usize,
    },

    #[error("column {column} is outside line {line} (max column {max_column})")]
    /// A column lies past the end of its line.
    ColumnOutOfBounds {
        /// Line of the rejected position.
        line: usize,
        /// The rejected column.
        column: usize,
        /// Largest valid column on that line.
        max_column: usize,
    },
}

#[derive(Debug, Error)]
/// Errors produced by the strict structured-payload parser.
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    /// The payload failed to parse as JSON.
    Json(#[from] serde_json::Error),

    #[error("payload is missing field '{0}'")]
    /// A required field was absent.
    MissingField(&'static str),

    #[error("payload field '{0}' is not a string")]
    /// A required field had a non-string value.
    NotAString(&'static str),
}

#[derive(Debug, Error)]
/// Errors produced while loading or validating a [`crate::ProofreadConfig`].
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    /// The config failed to deserialize.
    Json(#[from] serde_json::Error),

    #[error("invalid marker tag '{0}'")]
    /// A marker tag is empty or contains characters that cannot appear in a tag name.
    InvalidMarker(String),

    #[error("whitespace character {0:?} cannot be used as punctuation")]
    /// The punctuation set contains a whitespace character.
    InvalidPunctuation(char),

    #[error("marker pattern failed to compile: {0}")]
    /// The tagged-pair pattern built from the markers failed to compile.
    Regex(#[from] regex::Error),
}
