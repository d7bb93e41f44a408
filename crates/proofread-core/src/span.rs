//! Captured text spans.

use crate::line_index::{LineIndex, Position};

/// An immutable slice of document text plus the absolute character offset of its first char.
///
/// A span is captured once, when a correction round starts, and never updated: when the document
/// changes the host captures a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    text: String,
    anchor_offset: usize,
}

impl TextSpan {
    /// Create a span from already-extracted text.
    pub fn new(text: impl Into<String>, anchor_offset: usize) -> Self {
        Self {
            text: text.into(),
            anchor_offset,
        }
    }

    /// Capture the text between two character offsets of a snapshot (clamped to the buffer).
    pub fn capture(index: &LineIndex, start: usize, end: usize) -> Self {
        let end = end.min(index.char_count());
        let start = start.min(end);
        Self::new(index.slice(start, end), start)
    }

    /// Capture a whole line, excluding its terminator. Returns `None` if the line does not exist.
    pub fn capture_line(index: &LineIndex, line: usize) -> Option<Self> {
        let text = index.line_text(line)?;
        let anchor_offset = index.try_position_to_offset(Position::new(line, 0)).ok()?;
        Some(Self::new(text, anchor_offset))
    }

    /// Span text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute character offset of the first character.
    pub fn anchor_offset(&self) -> usize {
        self.anchor_offset
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if the span has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
