//! Greedy, single-pass, position-synchronized token alignment.
//!
//! Two cursors walk the original and fixed token sequences in lockstep. Non-whitespace tokens at
//! both cursors are paired unconditionally, so the walk is linear and deterministic but can
//! misplace boundaries when the fixed text inserts words in the middle.

use super::SpanEdit;
use crate::operation::EditKind;
use crate::token::Token;

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    at: usize,
}

impl<'a> Cursor<'_, 'a> {
    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.at)
    }

    fn on_word(&self) -> bool {
        self.peek().is_some_and(|t| !t.is_whitespace())
    }

    fn on_whitespace(&self) -> bool {
        self.peek().is_some_and(Token::is_whitespace)
    }

    fn done(&self) -> bool {
        self.at >= self.tokens.len()
    }

    /// Advance past one token, returning its char length.
    fn bump(&mut self) -> usize {
        let len = self.peek().map_or(0, |t| t.len);
        self.at += 1;
        len
    }

    /// Advance past a whitespace token at the cursor, if any, returning its text.
    fn eat_whitespace(&mut self) -> &'a str {
        match self.peek() {
            Some(token) if token.is_whitespace() => {
                let text = token.text;
                self.at += 1;
                text
            }
            _ => "",
        }
    }
}

pub(super) fn align(original: &[Token<'_>], fixed: &[Token<'_>]) -> Vec<SpanEdit> {
    let mut old = Cursor {
        tokens: original,
        at: 0,
    };
    let mut new = Cursor {
        tokens: fixed,
        at: 0,
    };
    let mut pos = 0;
    let mut edits = Vec::new();

    while !old.done() || !new.done() {
        match (old.peek().copied(), new.peek().copied()) {
            (Some(a), Some(b)) if a.is_whitespace() && b.is_whitespace() && a.text == b.text => {
                pos += old.bump();
                new.bump();
            }
            (Some(a), Some(b)) if !a.is_whitespace() && !b.is_whitespace() => {
                if a.text != b.text {
                    edits.push(SpanEdit::new(
                        EditKind::Substitution,
                        pos,
                        pos + a.len,
                        a.text,
                        b.text,
                    ));
                }
                pos += old.bump();
                new.bump();
                pos += old.eat_whitespace().chars().count();
                new.eat_whitespace();
            }
            (_, Some(b)) if !b.is_whitespace() && (old.done() || old.on_whitespace()) => {
                new.bump();
                let replacement = format!("{}{}", b.text, new.eat_whitespace());
                edits.push(SpanEdit::new(EditKind::Insertion, pos, pos, "", replacement));
            }
            (Some(a), _) if !a.is_whitespace() && (new.done() || new.on_whitespace()) => {
                edits.push(SpanEdit::new(EditKind::Deletion, pos, pos + a.len, a.text, ""));
                pos += old.bump();
                pos += old.eat_whitespace().chars().count();
            }
            _ => {
                if old.on_whitespace() {
                    pos += old.bump();
                }
                if new.on_whitespace() {
                    new.bump();
                }
            }
        }
    }

    debug_assert!(!old.on_word() && !new.on_word());
    edits
}
