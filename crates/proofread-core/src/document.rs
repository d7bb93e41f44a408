//! Rope-backed live document.
//!
//! A minimal mutable text buffer that plays the document-mutation role for hosts without their
//! own editor model (and for tests). Positions are interpreted against the current text.

use crate::line_index::{LineIndex, TextRange};
use crate::tracker::DocumentMutator;
use ropey::Rope;

/// Mutable document text.
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
    version: u64,
}

impl Document {
    /// Create a document from text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            version: 0,
        }
    }

    /// Complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of successful replacements so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Immutable snapshot for the position model.
    pub fn snapshot(&self) -> LineIndex {
        LineIndex::from_rope(self.rope.clone())
    }
}

impl DocumentMutator for Document {
    /// Fails (returns `false`) if either endpoint is outside the document or the range is
    /// inverted.
    fn replace(&mut self, range: TextRange, text: &str) -> bool {
        let snapshot = self.snapshot();
        let (Ok(start), Ok(end)) = (
            snapshot.try_position_to_offset(range.start),
            snapshot.try_position_to_offset(range.end),
        ) else {
            return false;
        };
        if start > end {
            return false;
        }

        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.version += 1;
        true
    }
}
