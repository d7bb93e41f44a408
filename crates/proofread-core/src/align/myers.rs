//! Myers token alignment.
//!
//! Diffs the non-whitespace token sequences of both sides and turns each non-equal hunk into
//! located edits. Whitespace is never compared; it only decides how far insertions and deletions
//! reach so that applying them leaves single separators behind.

use super::{SpanEdit, char_slice};
use crate::operation::EditKind;
use crate::token::Token;
use similar::{Algorithm, DiffOp, capture_diff_slices};

/// Non-whitespace tokens of one side plus the side's text.
struct Side<'t, 'a> {
    text: &'a str,
    len: usize,
    words: Vec<&'t Token<'a>>,
}

impl<'t, 'a> Side<'t, 'a> {
    fn new(text: &'a str, tokens: &'t [Token<'a>]) -> Self {
        Self {
            text,
            len: text.chars().count(),
            words: tokens.iter().filter(|t| !t.is_whitespace()).collect(),
        }
    }

    fn texts(&self) -> Vec<&'a str> {
        self.words.iter().map(|t| t.text).collect()
    }

    fn start(&self, word: usize) -> usize {
        self.words.get(word).map_or(self.len, |t| t.start)
    }

    fn end(&self, word: usize) -> usize {
        self.words.get(word).map_or(0, |t| t.end())
    }

    /// End of the previous word, or 0 at the start.
    fn prev_end(&self, word: usize) -> usize {
        word.checked_sub(1).map_or(0, |prev| self.end(prev))
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        char_slice(self.text, start, end)
    }
}

pub(super) fn align(
    original: &str,
    fixed: &str,
    old_tokens: &[Token<'_>],
    new_tokens: &[Token<'_>],
) -> Vec<SpanEdit> {
    let old = Side::new(original, old_tokens);
    let new = Side::new(fixed, new_tokens);

    let ops = capture_diff_slices(Algorithm::Myers, &old.texts(), &new.texts());
    let mut edits = Vec::new();

    for op in ops {
        match op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete {
                old_index, old_len, ..
            } => edits.push(deletion(&old, old_index, old_len)),
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => edits.push(insertion(&old, &new, old_index, new_index, new_len)),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                if old_len == new_len {
                    for k in 0..old_len {
                        let (a, b) = (old.words[old_index + k], new.words[new_index + k]);
                        edits.push(SpanEdit::new(
                            EditKind::Substitution,
                            a.start,
                            a.end(),
                            a.text,
                            b.text,
                        ));
                    }
                } else {
                    let start = old.start(old_index);
                    let end = old.end(old_index + old_len - 1);
                    let replacement =
                        new.slice(new.start(new_index), new.end(new_index + new_len - 1));
                    edits.push(SpanEdit::new(
                        EditKind::Substitution,
                        start,
                        end,
                        old.slice(start, end),
                        replacement,
                    ));
                }
            }
        }
    }

    edits
}

/// Delete a run of words.
///
/// A run that touches the previous word (e.g. the comma in `hello, world`) is deleted alone, so the
/// separator after it survives. Otherwise one adjoining whitespace gap goes with it: the trailing
/// gap while another word follows, the leading gap at the end of the text.
fn deletion(old: &Side<'_, '_>, index: usize, len: usize) -> SpanEdit {
    let last = index + len - 1;
    let mut start = old.start(index);
    let mut end = old.end(last);

    let attached = index > 0 && start == old.prev_end(index);
    if !attached {
        let has_next = last + 1 < old.words.len();
        let trailing_gap = old.start(last + 1) > end;
        let leading_gap = start > old.prev_end(index);

        if trailing_gap && has_next {
            end = old.start(last + 1);
        } else if leading_gap {
            start = old.prev_end(index);
        } else if trailing_gap {
            end = old.start(last + 1);
        }
    }

    SpanEdit::new(EditKind::Deletion, start, end, old.slice(start, end), "")
}

/// Insert a run of fixed words.
///
/// A run written directly after the previous word in the fixed text (`hello, world`) is attached
/// to the end of the matching original word; the whitespace that follows it is dropped when the
/// original already has a gap there. Any other run goes before the original word at `old_index`
/// and carries the whitespace that follows it; when appending after the last original word it
/// carries the whitespace that precedes it instead.
fn insertion(
    old: &Side<'_, '_>,
    new: &Side<'_, '_>,
    old_index: usize,
    new_index: usize,
    new_len: usize,
) -> SpanEdit {
    let last = new_index + new_len - 1;
    let attached =
        old_index > 0 && new_index > 0 && new.start(new_index) == new.prev_end(new_index);

    let (at, replacement) = if attached {
        let at = old.prev_end(old_index);
        let run = new.slice(new.start(new_index), new.start(last + 1));
        let gap_kept = old.start(old_index) > at;
        (at, if gap_kept { run.trim_end() } else { run })
    } else if old_index < old.words.len() {
        let at = old.start(old_index);
        (at, new.slice(new.start(new_index), new.start(last + 1)))
    } else {
        let at = if old.words.is_empty() {
            0
        } else {
            old.prev_end(old_index)
        };
        let from = if new_index == 0 {
            new.start(new_index)
        } else {
            new.prev_end(new_index)
        };
        (at, new.slice(from, new.end(last)))
    };

    SpanEdit::new(EditKind::Insertion, at, at, "", replacement)
}
