//! Edit operations: the unit of alignment output and of pending state.

use crate::line_index::TextRange;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// What an operation does to its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Replace existing text with different text.
    Substitution,
    /// Insert text at an empty range.
    Insertion,
    /// Remove existing text.
    Deletion,
}

/// A located, typed change.
///
/// `range` is expressed in document coordinates valid when the operation was created (and kept
/// valid afterwards by [`crate::RebasingTracker`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Operation kind.
    pub kind: EditKind,
    /// Range currently occupied by `original_text`.
    pub range: TextRange,
    /// Text currently in `range` (empty for insertions).
    pub original_text: String,
    /// Text to install (empty for deletions).
    pub replacement_text: String,
}

impl EditOperation {
    /// Create a substitution.
    pub fn substitution(
        range: TextRange,
        original_text: impl Into<String>,
        replacement_text: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::Substitution,
            range,
            original_text: original_text.into(),
            replacement_text: replacement_text.into(),
        }
    }

    /// Create an insertion.
    pub fn insertion(range: TextRange, replacement_text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insertion,
            range,
            original_text: String::new(),
            replacement_text: replacement_text.into(),
        }
    }

    /// Create a deletion.
    pub fn deletion(range: TextRange, original_text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Deletion,
            range,
            original_text: original_text.into(),
            replacement_text: String::new(),
        }
    }

    /// Returns `true` if applying this operation would not change the text.
    pub fn is_noop(&self) -> bool {
        self.original_text == self.replacement_text
    }

    /// Net change in length, in characters, caused by applying this operation.
    pub fn length_delta(&self) -> isize {
        let inserted = self.replacement_text.chars().count();
        let deleted = self.original_text.chars().count();
        if inserted >= deleted {
            (inserted - deleted) as isize
        } else {
            -((deleted - inserted) as isize)
        }
    }

    /// One-line, human-readable summary of the change.
    ///
    /// Snippets wider than `max_width` display columns are truncated (`0` disables truncation).
    pub fn describe(&self, max_width: usize) -> String {
        let original = snippet(&self.original_text, max_width);
        let replacement = snippet(&self.replacement_text, max_width);
        match self.kind {
            EditKind::Substitution => format!("Change \"{original}\" to \"{replacement}\""),
            EditKind::Insertion => format!("Insert \"{replacement}\""),
            EditKind::Deletion => format!("Remove \"{original}\""),
        }
    }
}

fn snippet(text: &str, max_width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| match c {
            '\n' => '⏎',
            '\r' | '\t' => ' ',
            c => c,
        })
        .collect();

    if max_width == 0 || flat.width() <= max_width {
        return flat;
    }

    // Leave one column for the ellipsis.
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut width = 0;
    for grapheme in flat.graphemes(true) {
        let w = grapheme.width();
        if width + w > budget {
            break;
        }
        width += w;
        out.push_str(grapheme);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_index::Position;

    fn range(start: usize, end: usize) -> TextRange {
        TextRange::new(Position::new(0, start), Position::new(0, end))
    }

    #[test]
    fn test_describe_each_kind() {
        assert_eq!(
            EditOperation::substitution(range(0, 4), "this", "This").describe(40),
            "Change \"this\" to \"This\""
        );
        assert_eq!(
            EditOperation::insertion(range(5, 5), "to the ").describe(40),
            "Insert \"to the \""
        );
        assert_eq!(
            EditOperation::deletion(range(2, 7), "very ").describe(40),
            "Remove \"very \""
        );
    }

    #[test]
    fn test_describe_is_single_line_and_truncated() {
        let op = EditOperation::substitution(range(0, 3), "a\nb", "x".repeat(50));
        let description = op.describe(10);
        assert!(!description.contains('\n'));
        assert_eq!(description, "Change \"a⏎b\" to \"xxxxxxxxx…\"");
    }

    #[test]
    fn test_truncation_respects_graphemes_and_wide_chars() {
        // Each CJK char is two columns wide.
        let op = EditOperation::insertion(range(0, 0), "你好世界");
        assert_eq!(op.describe(5), "Insert \"你好…\"");
        assert_eq!(op.describe(0), "Insert \"你好世界\"");
    }

    #[test]
    fn test_length_delta() {
        assert_eq!(
            EditOperation::substitution(range(0, 4), "test", "a test").length_delta(),
            2
        );
        assert_eq!(EditOperation::deletion(range(0, 2), "ab").length_delta(), -2);
        assert_eq!(
            EditOperation::substitution(range(0, 1), "é", "e").length_delta(),
            0
        );
    }
}
