//! Correction payloads produced by the external correction provider.
//!
//! The provider hands back one of two shapes:
//!
//! - free text where each suggested change is written as a marker-delimited pair, e.g.
//!   `<orig>sentenec</orig><edit>sentence.</edit>`;
//! - a structured pair `{"original": "...", "fixed": "..."}` holding the whole span before and
//!   after correction.

use crate::config::MarkerConfig;
use crate::error::{ConfigError, PayloadError};
use regex::Regex;
use serde_json::Value;

/// A raw correction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionPayload {
    /// Free text containing zero or more marker-delimited `(original, edit)` pairs.
    TaggedText(String),
    /// The full span before and after correction.
    StructuredPair {
        /// Text as originally captured.
        original: String,
        /// Corrected text.
        fixed: String,
    },
}

impl CorrectionPayload {
    /// Wrap tagged free text.
    pub fn tagged(text: impl Into<String>) -> Self {
        Self::TaggedText(text.into())
    }

    /// Build a structured pair.
    pub fn structured(original: impl Into<String>, fixed: impl Into<String>) -> Self {
        Self::StructuredPair {
            original: original.into(),
            fixed: fixed.into(),
        }
    }

    /// Strictly parse a structured `{"original": ..., "fixed": ...}` JSON payload.
    pub fn parse_json(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json)?;
        let original = string_field(&value, "original")?;
        let fixed = string_field(&value, "fixed")?;
        Ok(Self::structured(original, fixed))
    }
}

fn string_field<'a>(value: &'a Value, name: &'static str) -> Result<&'a str, PayloadError> {
    value
        .get(name)
        .ok_or(PayloadError::MissingField(name))?
        .as_str()
        .ok_or(PayloadError::NotAString(name))
}

/// One `(original, edit)` pair extracted from tagged text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedPair {
    /// The fragment the provider claims is in the source text.
    pub original: String,
    /// The suggested replacement.
    pub edit: String,
}

/// Extracts [`TaggedPair`]s from free text.
///
/// An original-marker pair must be followed, after an arbitrary gap (newlines included), by an
/// edit-marker pair. The gap is matched lazily, so each original binds to the nearest edit.
#[derive(Debug, Clone)]
pub struct TagScanner {
    pattern: Regex,
}

impl TagScanner {
    /// Build a scanner for the given markers.
    pub fn new(markers: &MarkerConfig) -> Result<Self, ConfigError> {
        let orig = regex::escape(&markers.original_tag);
        let edit = regex::escape(&markers.edit_tag);
        let pattern = Regex::new(&format!(
            r"(?s)<{orig}>(.*?)</{orig}>.*?<{edit}>(.*?)</{edit}>"
        ))?;
        Ok(Self { pattern })
    }

    /// Extract all pairs in order of appearance. Pairs with an empty original are skipped.
    pub fn scan(&self, text: &str) -> Vec<TaggedPair> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let original = caps.get(1)?.as_str();
                let edit = caps.get(2)?.as_str();
                if original.is_empty() {
                    tracing::debug!(edit, "dropping tagged pair with empty original");
                    return None;
                }
                Some(TaggedPair {
                    original: original.to_string(),
                    edit: edit.to_string(),
                })
            })
            .collect()
    }
}
