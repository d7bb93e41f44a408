#![warn(missing_docs)]
//! `proofread-lsp` - LSP presentation bridge for `proofread-core`.
//!
//! This crate turns pending suggestions into LSP-shaped JSON (diagnostics, quick-fix code
//! actions, workspace edits) and parses the `applySuggestion` command back into a typed
//! value. Ranges are converted from character columns to UTF-16 code units. Transport is left to
//! the host.

pub mod lsp_code_actions;
pub mod lsp_diagnostics;
pub mod lsp_sync;
pub mod lsp_text_edits;

pub use lsp_code_actions::{
    APPLY_SUGGESTION_COMMAND, APPLY_SUGGESTION_TITLE, ApplySuggestionCommand,
    code_action_for_suggestion, code_actions_for_range,
};
pub use lsp_diagnostics::{
    LspDiagnostic, LspDiagnosticSeverity, suggestion_to_diagnostic,
    suggestions_to_publish_diagnostics,
};
pub use lsp_sync::{LspCoordinateConverter, LspPosition, LspRange};
pub use lsp_text_edits::{LspTextEdit, text_edit_for_operation, workspace_edit_for_operation};
