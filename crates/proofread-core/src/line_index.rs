//! Text position model.
//!
//! Converts between flat character offsets and `(line, column)` positions against an immutable,
//! line-indexed snapshot of a document. Lines are split once, when the snapshot is built, on the
//! line-boundary characters recognized by [`ropey`] (`\n`, `\r\n`, `\r`, and the Unicode line
//! separators).
//!
//! All offsets and columns are counted in Unicode scalar values (`char`), never bytes.

use crate::error::PositionError;
use ropey::Rope;

/// A zero-based `(line, column)` position. Columns count `char`s from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line number (0-based).
    pub line: usize,
    /// Column in characters (0-based).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open `[start, end)` range of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl TextRange {
    /// Create a new range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty range anchored at `at`.
    pub fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Returns `true` if `start == end`.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if both endpoints are on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

/// Immutable line-indexed snapshot of a document.
///
/// Cloning is cheap: the underlying rope shares structure.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a snapshot from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub(crate) fn from_rope(rope: Rope) -> Self {
        Self { rope }
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total line count (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Convert a character offset into a position.
    ///
    /// # Panics
    ///
    /// Panics if `offset > self.char_count()`.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        match self.try_offset_to_position(offset) {
            Ok(position) => position,
            Err(err) => panic!("offset_to_position: {err}"),
        }
    }

    /// Convert a character offset into a position, reporting out-of-range input.
    pub fn try_offset_to_position(&self, offset: usize) -> Result<Position, PositionError> {
        let len = self.rope.len_chars();
        if offset > len {
            return Err(PositionError::OffsetOutOfBounds { offset, len });
        }

        let line = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line);
        Ok(Position::new(line, column))
    }

    /// Convert a position into a character offset.
    ///
    /// # Panics
    ///
    /// Panics if the line does not exist or the column lies past the end of the line.
    pub fn position_to_offset(&self, position: Position) -> usize {
        match self.try_position_to_offset(position) {
            Ok(offset) => offset,
            Err(err) => panic!("position_to_offset: {err}"),
        }
    }

    /// Convert a position into a character offset, reporting out-of-range input.
    ///
    /// The largest valid column on a terminated line is the one just before the final terminator
    /// character, so the position between `\r` and `\n` round-trips.
    pub fn try_position_to_offset(&self, position: Position) -> Result<usize, PositionError> {
        let line_count = self.rope.len_lines();
        if position.line >= line_count {
            return Err(PositionError::LineOutOfBounds {
                line: position.line,
                line_count,
            });
        }

        let max_column = self.max_column(position.line);
        if position.column > max_column {
            return Err(PositionError::ColumnOutOfBounds {
                line: position.line,
                column: position.column,
                max_column,
            });
        }

        Ok(self.rope.line_to_char(position.line) + position.column)
    }

    fn max_column(&self, line: usize) -> usize {
        let line_len = self.rope.line(line).len_chars();
        if line + 1 < self.rope.len_lines() {
            // Every line but the last ends with a terminator.
            line_len.saturating_sub(1)
        } else {
            line_len
        }
    }

    /// Convert a pair of character offsets into a range.
    ///
    /// # Panics
    ///
    /// Panics if either offset is out of bounds.
    pub fn range_for_offsets(&self, start: usize, end: usize) -> TextRange {
        TextRange::new(self.offset_to_position(start), self.offset_to_position(end))
    }

    /// Text of `line`, without its terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Text between two character offsets (clamped to the buffer).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.rope.len_chars();
        let end = end.min(len);
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Complete text of the snapshot.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let index = LineIndex::from_text("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.char_count(), 0);
        assert_eq!(index.offset_to_position(0), Position::new(0, 0));
        assert_eq!(index.position_to_offset(Position::new(0, 0)), 0);
    }

    #[test]
    fn test_offset_to_position() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.offset_to_position(0), Position::new(0, 0)); // A
        assert_eq!(index.offset_to_position(2), Position::new(0, 2)); // C
        assert_eq!(index.offset_to_position(3), Position::new(0, 3)); // \n
        assert_eq!(index.offset_to_position(4), Position::new(1, 0)); // D
        assert_eq!(index.offset_to_position(8), Position::new(2, 0)); // G
        assert_eq!(index.offset_to_position(11), Position::new(2, 3)); // EOF
    }

    #[test]
    fn test_position_to_offset() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.position_to_offset(Position::new(0, 0)), 0);
        assert_eq!(index.position_to_offset(Position::new(0, 3)), 3);
        assert_eq!(index.position_to_offset(Position::new(1, 0)), 4);
        assert_eq!(index.position_to_offset(Position::new(2, 3)), 11);
    }

    #[test]
    fn test_round_trip_every_offset() {
        for text in ["ABC\nDEF\nGHI", "a\r\nb\r\n", "\n\n", "x\ry", "你好\n世界👋"] {
            let index = LineIndex::from_text(text);
            for offset in 0..=index.char_count() {
                let position = index.offset_to_position(offset);
                assert_eq!(
                    index.position_to_offset(position),
                    offset,
                    "round trip failed for {text:?} at {offset}"
                );
            }
        }
    }

    #[test]
    fn test_crlf_lines() {
        let index = LineIndex::from_text("ab\r\ncd");
        assert_eq!(index.line_count(), 2);
        // Between '\r' and '\n' is still on line 0.
        assert_eq!(index.offset_to_position(3), Position::new(0, 3));
        assert_eq!(index.offset_to_position(4), Position::new(1, 0));
        assert_eq!(index.line_text(0).as_deref(), Some("ab"));
    }

    #[test]
    fn test_utf8_cjk() {
        let index = LineIndex::from_text("你好\n世界");
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.offset_to_position(1), Position::new(0, 1));
        assert_eq!(index.offset_to_position(3), Position::new(1, 0));
        assert_eq!(index.slice(3, 5), "世界");
    }

    #[test]
    fn test_out_of_range_offset_is_reported() {
        let index = LineIndex::from_text("abc");
        assert_eq!(
            index.try_offset_to_position(4),
            Err(PositionError::OffsetOutOfBounds { offset: 4, len: 3 })
        );
    }

    #[test]
    fn test_out_of_range_position_is_reported() {
        let index = LineIndex::from_text("abc\nde");
        assert_eq!(
            index.try_position_to_offset(Position::new(5, 0)),
            Err(PositionError::LineOutOfBounds {
                line: 5,
                line_count: 2
            })
        );
        assert_eq!(
            index.try_position_to_offset(Position::new(0, 4)),
            Err(PositionError::ColumnOutOfBounds {
                line: 0,
                column: 4,
                max_column: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "outside the buffer")]
    fn test_out_of_range_offset_fails_fast() {
        let index = LineIndex::from_text("abc");
        let _ = index.offset_to_position(10);
    }

    #[test]
    fn test_slice_clamps() {
        let index = LineIndex::from_text("Hello World");
        assert_eq!(index.slice(6, 100), "World");
        assert_eq!(index.slice(8, 2), "");
    }
}
