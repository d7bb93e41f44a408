//! Pending suggestions as `textDocument/publishDiagnostics`.
//!
//! Every pending suggestion becomes one informational diagnostic whose `data` carries the
//! operation id, so a later code-action request can be matched back to the tracker.

use crate::lsp_sync::{LspCoordinateConverter, LspRange};
use crate::lsp_text_edits::{range_from_value, range_to_value};
use proofread_core::{LineIndex, OperationId, Suggestion};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Severity levels for `textDocument/publishDiagnostics`.
pub enum LspDiagnosticSeverity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Information,
    /// Hint diagnostics.
    Hint,
}

impl LspDiagnosticSeverity {
    /// Convert the numeric LSP `DiagnosticSeverity` into an enum.
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Information),
            4 => Some(Self::Hint),
            _ => None,
        }
    }

    /// Numeric LSP value.
    pub fn to_u64(self) -> u64 {
        match self {
            Self::Error => 1,
            Self::Warning => 2,
            Self::Information => 3,
            Self::Hint => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A diagnostic describing one pending suggestion.
pub struct LspDiagnostic {
    /// Diagnostic range.
    pub range: LspRange,
    /// Severity; suggestions are always informational.
    pub severity: LspDiagnosticSeverity,
    /// Diagnostic source shown by the client.
    pub source: String,
    /// Human-readable summary of the suggestion.
    pub message: String,
    /// The suggestion this diagnostic stands for.
    pub operation_id: OperationId,
}

impl LspDiagnostic {
    /// Serialize as a `Diagnostic` JSON value.
    pub fn to_value(&self) -> Value {
        json!({
            "range": range_to_value(&self.range),
            "severity": self.severity.to_u64(),
            "source": self.source,
            "message": self.message,
            "data": { "operationId": self.operation_id.get() },
        })
    }

    /// Parse a diagnostic previously produced by [`to_value`](Self::to_value), e.g. one the
    /// client echoes back in a `textDocument/codeAction` request.
    ///
    /// Diagnostics from other sources (no `data.operationId`) yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let operation_id = value.get("data")?.get("operationId")?.as_u64()?;
        Some(Self {
            range: range_from_value(value.get("range")?)?,
            severity: value
                .get("severity")
                .and_then(Value::as_u64)
                .and_then(LspDiagnosticSeverity::from_u64)
                .unwrap_or(LspDiagnosticSeverity::Information),
            source: value
                .get("source")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            operation_id: OperationId::from_raw(operation_id),
        })
    }
}

/// Build the diagnostic for `suggestion`, converting its range against `index`.
pub fn suggestion_to_diagnostic(
    index: &LineIndex,
    suggestion: &Suggestion,
    source: &str,
) -> LspDiagnostic {
    LspDiagnostic {
        range: LspCoordinateConverter::range_to_lsp(index, suggestion.operation.range),
        severity: LspDiagnosticSeverity::Information,
        source: source.to_string(),
        message: suggestion.description.clone(),
        operation_id: suggestion.id,
    }
}

/// Build `textDocument/publishDiagnostics` params for every pending suggestion of `uri`.
///
/// An empty `suggestions` slice clears the client's diagnostics for the document.
pub fn suggestions_to_publish_diagnostics(
    uri: &str,
    version: Option<i32>,
    index: &LineIndex,
    suggestions: &[Suggestion],
    source: &str,
) -> Value {
    let diagnostics: Vec<Value> = suggestions
        .iter()
        .map(|suggestion| suggestion_to_diagnostic(index, suggestion, source).to_value())
        .collect();
    tracing::debug!(uri, count = diagnostics.len(), "publishing suggestion diagnostics");

    let mut params = json!({
        "uri": uri,
        "diagnostics": diagnostics,
    });
    if let Some(version) = version {
        params["version"] = json!(version);
    }
    params
}
