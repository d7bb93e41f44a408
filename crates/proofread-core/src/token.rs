//! Lossless tokenizer.
//!
//! Splits text into maximal runs of whitespace, single punctuation characters, and words (maximal
//! runs of everything else). Concatenating the token texts always reproduces the input.

use crate::config::DEFAULT_PUNCTUATION;

/// Token class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A maximal run of whitespace characters.
    Whitespace,
    /// A single character from the punctuation set.
    Punctuation,
    /// A maximal run of non-whitespace, non-punctuation characters.
    Word,
}

/// A token borrowed from its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token class.
    pub kind: TokenKind,
    /// Token text.
    pub text: &'a str,
    /// Start offset in characters within the tokenized text.
    pub start: usize,
    /// Length in characters.
    pub len: usize,
}

impl Token<'_> {
    /// Exclusive end offset in characters.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns `true` for whitespace tokens.
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

/// Tokenizer over a fixed punctuation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    punctuation: Vec<char>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_PUNCTUATION)
    }
}

impl Tokenizer {
    /// Create a tokenizer that treats every char of `punctuation` as a punctuation token.
    pub fn new(punctuation: &str) -> Self {
        let mut punctuation: Vec<char> = punctuation.chars().collect();
        punctuation.sort_unstable();
        punctuation.dedup();
        Self { punctuation }
    }

    fn classify(&self, c: char) -> TokenKind {
        if c.is_whitespace() {
            TokenKind::Whitespace
        } else if self.punctuation.binary_search(&c).is_ok() {
            TokenKind::Punctuation
        } else {
            TokenKind::Word
        }
    }

    /// Tokenize `text`.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        // (kind, byte start, char start, char len)
        let mut current: Option<(TokenKind, usize, usize, usize)> = None;

        for (char_idx, (byte_idx, c)) in text.char_indices().enumerate() {
            let kind = self.classify(c);
            match current.as_mut() {
                Some((run_kind, _, _, len))
                    if *run_kind == kind && kind != TokenKind::Punctuation =>
                {
                    *len += 1;
                }
                _ => {
                    if let Some(run) = current.take() {
                        tokens.push(finish(text, run, byte_idx));
                    }
                    current = Some((kind, byte_idx, char_idx, 1));
                }
            }
        }

        if let Some(run) = current {
            tokens.push(finish(text, run, text.len()));
        }

        tokens
    }
}

fn finish(
    text: &str,
    (kind, byte_start, start, len): (TokenKind, usize, usize, usize),
    byte_end: usize,
) -> Token<'_> {
    Token {
        kind,
        text: &text[byte_start..byte_end],
        start,
        len,
    }
}
