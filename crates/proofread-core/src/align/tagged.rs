//! Tagged-pair alignment: each pair is located by literal substring search in the span.

use super::SpanEdit;
use crate::operation::EditKind;
use crate::payload::TaggedPair;

/// Locate each pair's original fragment and emit one substitution per resolvable pair.
///
/// Pairs are emitted in the order given. The first occurrence wins, even when an earlier pair
/// already claimed it; overlapping results are left for the tracker to sort out on application.
pub(super) fn align(text: &str, pairs: &[TaggedPair]) -> Vec<SpanEdit> {
    pairs
        .iter()
        .filter_map(|pair| {
            if pair.original == pair.edit {
                tracing::debug!(original = %pair.original, "dropping no-op pair");
                return None;
            }
            let Some(byte_start) = text.find(&pair.original) else {
                tracing::debug!(original = %pair.original, "original fragment not found in span");
                return None;
            };

            let start = text[..byte_start].chars().count();
            let end = start + pair.original.chars().count();
            Some(SpanEdit::new(
                EditKind::Substitution,
                start,
                end,
                pair.original.as_str(),
                pair.edit.as_str(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(original: &str, edit: &str) -> TaggedPair {
        TaggedPair {
            original: original.to_string(),
            edit: edit.to_string(),
        }
    }

    #[test]
    fn test_substitutions_at_first_occurrence() {
        let edits = align(
            "this is test sentenec",
            &[
                pair("this", "This"),
                pair("test", "a test"),
                pair("sentenec", "sentence."),
            ],
        );
        let ranges: Vec<_> = edits.iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(ranges, vec![(0, 4), (8, 12), (13, 21)]);
        assert!(edits.iter().all(|e| e.kind == EditKind::Substitution));
    }

    #[test]
    fn test_missing_and_noop_pairs_are_dropped() {
        let edits = align(
            "one two",
            &[pair("three", "3"), pair("one", "one"), pair("two", "2")],
        );
        assert_eq!(edits, vec![SpanEdit::new(EditKind::Substitution, 4, 7, "two", "2")]);
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let edits = align("café au lait", &[pair("lait", "milk")]);
        assert_eq!((edits[0].start, edits[0].end), (8, 12));
    }

    #[test]
    fn test_overlapping_pairs_are_all_emitted() {
        let edits = align("the the cat", &[pair("the the", "the"), pair("the cat", "a cat")]);
        assert_eq!(edits.len(), 2);
        assert_eq!((edits[0].start, edits[0].end), (0, 7));
        assert_eq!((edits[1].start, edits[1].end), (4, 11));
    }
}
