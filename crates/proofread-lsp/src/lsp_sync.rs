//! Coordinate conversion between core positions and LSP positions.
//!
//! Core columns count Unicode scalar values; LSP `character` counts UTF-16 code units. Every
//! conversion works line by line against a [`LineIndex`] snapshot of the current document.

use proofread_core::{LineIndex, Position, TextRange};

/// A zero-based LSP position. `character` is in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LspPosition {
    /// Line number.
    pub line: u32,
    /// UTF-16 offset within the line.
    pub character: u32,
}

impl LspPosition {
    /// Create a position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open LSP range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LspRange {
    /// Inclusive start.
    pub start: LspPosition,
    /// Exclusive end.
    pub end: LspPosition,
}

impl LspRange {
    /// Create a range.
    pub fn new(start: LspPosition, end: LspPosition) -> Self {
        Self { start, end }
    }
}

/// Char column ⇄ UTF-16 column conversion.
pub struct LspCoordinateConverter;

impl LspCoordinateConverter {
    /// UTF-16 width of the first `column` chars of `line_text`.
    pub fn column_to_utf16(line_text: &str, column: usize) -> usize {
        line_text.chars().take(column).map(char::len_utf16).sum()
    }

    /// Char column reached after `utf16` code units of `line_text`.
    ///
    /// An offset inside a surrogate pair rounds up to the following char; offsets past the end of
    /// the line clamp to its length.
    pub fn utf16_to_column(line_text: &str, utf16: usize) -> usize {
        let mut units = 0;
        line_text
            .chars()
            .take_while(|c| {
                let inside = units < utf16;
                units += c.len_utf16();
                inside
            })
            .count()
    }

    /// Convert one core position.
    ///
    /// Lines past the end of the snapshot convert as if they were empty.
    pub fn position_to_lsp(index: &LineIndex, position: Position) -> LspPosition {
        let line_text = index.line_text(position.line).unwrap_or_default();
        let character = Self::column_to_utf16(&line_text, position.column);
        LspPosition::new(position.line as u32, character as u32)
    }

    /// Convert one LSP position.
    pub fn lsp_to_position(index: &LineIndex, position: LspPosition) -> Position {
        let line = position.line as usize;
        let line_text = index.line_text(line).unwrap_or_default();
        Position::new(
            line,
            Self::utf16_to_column(&line_text, position.character as usize),
        )
    }

    /// Convert a core [`TextRange`].
    pub fn range_to_lsp(index: &LineIndex, range: TextRange) -> LspRange {
        LspRange::new(
            Self::position_to_lsp(index, range.start),
            Self::position_to_lsp(index, range.end),
        )
    }

    /// Convert an LSP range into a core [`TextRange`].
    pub fn lsp_to_range(index: &LineIndex, range: LspRange) -> TextRange {
        TextRange::new(
            Self::lsp_to_position(index, range.start),
            Self::lsp_to_position(index, range.end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_utf16() {
        let text = "hello你好👋";
        assert_eq!(LspCoordinateConverter::column_to_utf16(text, 5), 5);
        assert_eq!(LspCoordinateConverter::column_to_utf16(text, 7), 7);
        assert_eq!(LspCoordinateConverter::column_to_utf16(text, 8), 9);
    }

    #[test]
    fn test_utf16_to_column() {
        let text = "hello你好👋";
        assert_eq!(LspCoordinateConverter::utf16_to_column(text, 6), 6);
        assert_eq!(LspCoordinateConverter::utf16_to_column(text, 9), 8);
        // Inside the surrogate pair.
        assert_eq!(LspCoordinateConverter::utf16_to_column(text, 8), 8);
        assert_eq!(LspCoordinateConverter::utf16_to_column(text, 50), 8);
    }

    #[test]
    fn test_range_round_trip() {
        let index = LineIndex::from_text("title\nwe 👋 was late");
        let range = TextRange::new(Position::new(1, 5), Position::new(1, 8));

        let lsp = LspCoordinateConverter::range_to_lsp(&index, range);
        assert_eq!(
            lsp,
            LspRange::new(LspPosition::new(1, 6), LspPosition::new(1, 9))
        );
        assert_eq!(LspCoordinateConverter::lsp_to_range(&index, lsp), range);
    }
}
