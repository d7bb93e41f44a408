//! Alignment engine.
//!
//! Turns a [`CorrectionPayload`] for a captured [`TextSpan`] into an ordered list of
//! [`EditOperation`]s expressed in document coordinates. The engine is stateless: it never touches
//! pending state, it only returns a fresh list for the caller to install.
//!
//! Internally every mode first produces [`SpanEdit`]s (character offsets relative to the span),
//! which [`SpanMapper`] then anchors into the document through the position model.

mod greedy;
mod myers;
mod tagged;

use crate::config::{AlignmentStrategy, ProofreadConfig};
use crate::error::ConfigError;
use crate::line_index::{LineIndex, TextRange};
use crate::operation::{EditKind, EditOperation};
use crate::payload::{CorrectionPayload, TagScanner};
use crate::span::TextSpan;
use crate::token::Tokenizer;

/// An edit in span-relative character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpanEdit {
    pub(crate) kind: EditKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) original: String,
    pub(crate) replacement: String,
}

impl SpanEdit {
    pub(crate) fn new(
        kind: EditKind,
        start: usize,
        end: usize,
        original: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            start,
            end,
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}

/// Anchors span-relative offsets into document positions.
struct SpanMapper<'a> {
    anchor: usize,
    index: &'a LineIndex,
}

impl SpanMapper<'_> {
    fn range(&self, start: usize, end: usize) -> TextRange {
        self.index
            .range_for_offsets(self.anchor + start, self.anchor + end)
    }

    fn locate(&self, edit: SpanEdit) -> EditOperation {
        EditOperation {
            kind: edit.kind,
            range: self.range(edit.start, edit.end),
            original_text: edit.original,
            replacement_text: edit.replacement,
        }
    }
}

/// Substring of `text` between two character offsets.
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let mut indices = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()));
    let byte_start = indices.nth(start).unwrap_or(text.len());
    let byte_end = if end > start {
        indices.nth(end - start - 1).unwrap_or(text.len())
    } else {
        byte_start
    };
    &text[byte_start..byte_end]
}

/// Stateless alignment engine configured once per host.
#[derive(Debug, Clone)]
pub struct Aligner {
    tokenizer: Tokenizer,
    scanner: TagScanner,
    strategy: AlignmentStrategy,
}

impl Aligner {
    /// Build an aligner from a configuration.
    pub fn new(config: &ProofreadConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            tokenizer: Tokenizer::new(&config.punctuation),
            scanner: TagScanner::new(&config.markers)?,
            strategy: config.strategy,
        })
    }

    /// The token-diff strategy in use.
    pub fn strategy(&self) -> AlignmentStrategy {
        self.strategy
    }

    /// Align a payload against the span it was produced for.
    ///
    /// `index` must be the snapshot the span was captured from. Malformed payloads, including a
    /// structured pair whose `original` is not the span text, yield an empty list.
    ///
    /// # Panics
    ///
    /// Panics if the span does not fit inside `index` (a caller bug).
    pub fn align(
        &self,
        span: &TextSpan,
        payload: &CorrectionPayload,
        index: &LineIndex,
    ) -> Vec<EditOperation> {
        let edits = match payload {
            CorrectionPayload::TaggedText(text) => {
                tagged::align(span.text(), &self.scanner.scan(text))
            }
            CorrectionPayload::StructuredPair { original, fixed } => {
                if original != span.text() {
                    tracing::debug!(
                        original_len = original.chars().count(),
                        span_len = span.char_len(),
                        "structured payload does not match the captured span"
                    );
                    return Vec::new();
                }
                let mut edits = self.diff_tokens(original, fixed);
                edits.sort_by_key(|edit| edit.start);
                edits
            }
        };

        let mapper = SpanMapper {
            anchor: span.anchor_offset(),
            index,
        };
        edits
            .into_iter()
            .filter(|edit| edit.original != edit.replacement)
            .map(|edit| mapper.locate(edit))
            .collect()
    }

    /// Align a structured JSON payload, degrading any parse failure to zero operations.
    pub fn align_json(&self, span: &TextSpan, json: &str, index: &LineIndex) -> Vec<EditOperation> {
        match CorrectionPayload::parse_json(json) {
            Ok(payload) => self.align(span, &payload, index),
            Err(err) => {
                tracing::debug!(%err, "malformed structured payload");
                Vec::new()
            }
        }
    }

    fn diff_tokens(&self, original: &str, fixed: &str) -> Vec<SpanEdit> {
        let old = self.tokenizer.tokenize(original);
        let new = self.tokenizer.tokenize(fixed);
        match self.strategy {
            AlignmentStrategy::Myers => myers::align(original, fixed, &old, &new),
            AlignmentStrategy::Greedy => greedy::align(&old, &new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_index::Position;

    #[test]
    fn test_char_slice() {
        assert_eq!(char_slice("héllo wörld", 6, 11), "wörld");
        assert_eq!(char_slice("héllo", 1, 2), "é");
        assert_eq!(char_slice("abc", 3, 3), "");
        assert_eq!(char_slice("abc", 1, 1), "");
        assert_eq!(char_slice("abc", 0, 3), "abc");
    }

    #[test]
    fn test_operations_are_anchored_into_the_document() {
        let index = LineIndex::from_text("Title\nthis is test\n");
        let span = TextSpan::capture_line(&index, 1).unwrap();
        let aligner = Aligner::new(&ProofreadConfig::default()).unwrap();

        let ops = aligner.align(
            &span,
            &CorrectionPayload::tagged("<orig>test</orig><edit>a test</edit>"),
            &index,
        );

        assert_eq!(ops.len(), 1);
        assert_eq!(
            ops[0].range,
            TextRange::new(Position::new(1, 8), Position::new(1, 12))
        );
    }

    #[test]
    fn test_align_json_degrades_to_empty() {
        let index = LineIndex::from_text("abc");
        let span = TextSpan::capture(&index, 0, 3);
        let aligner = Aligner::new(&ProofreadConfig::default()).unwrap();
        assert!(aligner.align_json(&span, "{ not json", &index).is_empty());
        assert!(aligner.align_json(&span, r#"{"fixed":"x"}"#, &index).is_empty());
    }
}
