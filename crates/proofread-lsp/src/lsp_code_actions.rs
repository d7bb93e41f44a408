//! Quick-fix code actions and the `applySuggestion` command.
//!
//! A code action does not embed a `WorkspaceEdit`: the range it would carry goes stale as soon as
//! a sibling suggestion is applied. Instead it names the suggestion through a typed command, and
//! the host resolves the current range from the tracker when the command is executed.

use crate::lsp_diagnostics::suggestion_to_diagnostic;
use crate::lsp_sync::{LspCoordinateConverter, LspRange};
use proofread_core::{
    ApplyOutcome, DocumentId, DocumentMutator, LineIndex, OperationId, Proofreader, Suggestion,
};
use serde_json::{Value, json};

/// Command identifier registered by the host.
pub const APPLY_SUGGESTION_COMMAND: &str = "applySuggestion";

/// Title of every suggestion code action.
pub const APPLY_SUGGESTION_TITLE: &str = "Apply suggestion";

/// Arguments of the `applySuggestion` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplySuggestionCommand {
    /// Document URI.
    pub uri: String,
    /// The suggestion to apply.
    pub operation_id: OperationId,
}

impl ApplySuggestionCommand {
    /// Create command arguments.
    pub fn new(uri: impl Into<String>, operation_id: OperationId) -> Self {
        Self {
            uri: uri.into(),
            operation_id,
        }
    }

    /// Serialize as an LSP `Command`.
    pub fn to_value(&self) -> Value {
        json!({
            "title": APPLY_SUGGESTION_TITLE,
            "command": APPLY_SUGGESTION_COMMAND,
            "arguments": [{
                "uri": self.uri,
                "operationId": self.operation_id.get(),
            }],
        })
    }

    /// Parse an LSP `Command` or `workspace/executeCommand` params.
    ///
    /// Returns `None` for other commands or malformed arguments.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("command")?.as_str()? != APPLY_SUGGESTION_COMMAND {
            return None;
        }
        let args = value.get("arguments")?.as_array()?.first()?;
        Some(Self {
            uri: args.get("uri")?.as_str()?.to_string(),
            operation_id: OperationId::from_raw(args.get("operationId")?.as_u64()?),
        })
    }

    /// Apply the named suggestion through `mutator`.
    pub fn execute<M: DocumentMutator + ?Sized>(
        &self,
        proofreader: &mut Proofreader,
        mutator: &mut M,
    ) -> ApplyOutcome {
        let document = DocumentId::from(self.uri.as_str());
        let outcome = proofreader.apply(&document, self.operation_id, mutator);
        tracing::debug!(
            uri = %self.uri,
            id = %self.operation_id,
            applied = outcome.is_applied(),
            "executed applySuggestion"
        );
        outcome
    }
}

/// The quick-fix code action offering `suggestion`.
pub fn code_action_for_suggestion(
    uri: &str,
    index: &LineIndex,
    suggestion: &Suggestion,
    source: &str,
) -> Value {
    let diagnostic = suggestion_to_diagnostic(index, suggestion, source);
    json!({
        "title": APPLY_SUGGESTION_TITLE,
        "kind": "quickfix",
        "isPreferred": true,
        "diagnostics": [diagnostic.to_value()],
        "command": ApplySuggestionCommand::new(uri, suggestion.id).to_value(),
    })
}

/// Code actions for every suggestion whose range touches `range` (a `textDocument/codeAction`
/// request range).
pub fn code_actions_for_range(
    uri: &str,
    index: &LineIndex,
    suggestions: &[Suggestion],
    range: LspRange,
    source: &str,
) -> Vec<Value> {
    let request = LspCoordinateConverter::lsp_to_range(index, range);
    suggestions
        .iter()
        .filter(|suggestion| {
            let target = suggestion.operation.range;
            target.start <= request.end && request.start <= target.end
        })
        .map(|suggestion| code_action_for_suggestion(uri, index, suggestion, source))
        .collect()
}
