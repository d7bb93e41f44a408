//! `TextEdit` / `WorkspaceEdit` shapes for applying a suggestion through an LSP client.
//!
//! Only what one replacement needs is modelled, so no `lsp-types` dependency is pulled in.

use crate::lsp_sync::{LspCoordinateConverter, LspPosition, LspRange};
use proofread_core::{EditOperation, LineIndex};
use serde_json::{Map, Value, json};

/// One replacement in LSP coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LspTextEdit {
    /// Range to replace, in UTF-16 columns.
    pub range: LspRange,
    /// Replacement text.
    pub new_text: String,
}

impl LspTextEdit {
    /// Serialize as a `TextEdit` JSON value.
    pub fn to_value(&self) -> Value {
        json!({
            "range": range_to_value(&self.range),
            "newText": self.new_text,
        })
    }
}

fn position_from_value(value: &Value) -> Option<LspPosition> {
    let field = |name: &str| u32::try_from(value.get(name)?.as_u64()?).ok();
    Some(LspPosition::new(field("line")?, field("character")?))
}

/// Parse a `Range` object. Coordinates that do not fit a `u32` are rejected.
pub(crate) fn range_from_value(value: &Value) -> Option<LspRange> {
    Some(LspRange::new(
        position_from_value(value.get("start")?)?,
        position_from_value(value.get("end")?)?,
    ))
}

pub(crate) fn range_to_value(range: &LspRange) -> Value {
    json!({
        "start": { "line": range.start.line, "character": range.start.character },
        "end": { "line": range.end.line, "character": range.end.character },
    })
}

/// The `TextEdit` that performs `operation` on the document `index` was taken from.
pub fn text_edit_for_operation(index: &LineIndex, operation: &EditOperation) -> LspTextEdit {
    LspTextEdit {
        range: LspCoordinateConverter::range_to_lsp(index, operation.range),
        new_text: operation.replacement_text.clone(),
    }
}

/// A `WorkspaceEdit` (`changes` form) that performs `operation` on `uri`.
pub fn workspace_edit_for_operation(uri: &str, index: &LineIndex, operation: &EditOperation) -> Value {
    let edit = text_edit_for_operation(index, operation);
    let mut changes = Map::new();
    changes.insert(uri.to_string(), json!([edit.to_value()]));
    json!({ "changes": changes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proofread_core::{Position, TextRange};

    #[test]
    fn test_text_edit_for_insertion_is_zero_width() {
        let index = LineIndex::from_text("I go store");
        let op = EditOperation::insertion(TextRange::point(Position::new(0, 5)), "to the ");
        let edit = text_edit_for_operation(&index, &op);
        assert_eq!(edit.range.start, edit.range.end);
        assert_eq!(edit.range.start, LspPosition::new(0, 5));
        assert_eq!(edit.new_text, "to the ");
    }

    #[test]
    fn test_workspace_edit_shape() {
        let index = LineIndex::from_text("one\nteh end");
        let op = EditOperation::substitution(
            TextRange::new(Position::new(1, 0), Position::new(1, 3)),
            "teh",
            "the",
        );

        let edit = workspace_edit_for_operation("file:///a.txt", &index, &op);
        assert_eq!(
            edit,
            json!({
                "changes": {
                    "file:///a.txt": [{
                        "range": {
                            "start": { "line": 1, "character": 0 },
                            "end": { "line": 1, "character": 3 }
                        },
                        "newText": "the"
                    }]
                }
            })
        );
    }

    #[test]
    fn test_range_rejects_out_of_range_coordinates() {
        let range = LspRange::new(LspPosition::new(2, 1), LspPosition::new(2, 4));
        assert_eq!(range_from_value(&range_to_value(&range)), Some(range));

        let too_far = json!({
            "start": { "line": 4_294_967_296u64, "character": 0 },
            "end": { "line": 0, "character": 0 }
        });
        assert_eq!(range_from_value(&too_far), None);
        let negative = json!({
            "start": { "line": 0, "character": -1 },
            "end": { "line": 0, "character": 0 }
        });
        assert_eq!(range_from_value(&negative), None);
    }
}
