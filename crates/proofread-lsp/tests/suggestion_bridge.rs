use pretty_assertions::assert_eq;
use proofread_core::{CorrectionPayload, Document, DocumentId, PendingState, Proofreader, TextSpan};
use proofread_lsp::{
    ApplySuggestionCommand, LspDiagnostic, LspPosition, LspRange, code_action_for_suggestion,
    code_actions_for_range, suggestions_to_publish_diagnostics, workspace_edit_for_operation,
};
use serde_json::{Value, json};

const URI: &str = "file:///notes.md";
const SOURCE: &str = "Grammar Assistant";

fn round(text: &str, payload: CorrectionPayload) -> (Proofreader, Document) {
    let mut proofreader = Proofreader::with_default_config().unwrap();
    let document = Document::new(text);
    let index = document.snapshot();
    let span = TextSpan::capture(&index, 0, index.char_count());
    proofreader.submit(&DocumentId::from(URI), &index, &span, &payload);
    (proofreader, document)
}

#[test]
fn test_publish_diagnostics_use_utf16_columns() {
    // "👋" occupies one char but two UTF-16 code units.
    let (proofreader, document) = round(
        "👋 teh cat",
        CorrectionPayload::tagged("<orig>teh</orig><edit>the</edit>"),
    );
    let suggestions = proofreader.suggestions(&DocumentId::from(URI));

    let params = suggestions_to_publish_diagnostics(
        URI,
        Some(4),
        &document.snapshot(),
        &suggestions,
        &proofreader.config().diagnostic_source,
    );

    assert_eq!(
        params,
        json!({
            "uri": URI,
            "version": 4,
            "diagnostics": [{
                "range": {
                    "start": { "line": 0, "character": 3 },
                    "end": { "line": 0, "character": 6 }
                },
                "severity": 3,
                "source": "Grammar Assistant",
                "message": "Change \"teh\" to \"the\"",
                "data": { "operationId": suggestions[0].id.get() }
            }]
        })
    );
}

#[test]
fn test_empty_round_publishes_no_diagnostics() {
    let (proofreader, document) = round("fine text", CorrectionPayload::tagged(""));
    let suggestions = proofreader.suggestions(&DocumentId::from(URI));
    let params =
        suggestions_to_publish_diagnostics(URI, None, &document.snapshot(), &suggestions, SOURCE);
    assert_eq!(params, json!({ "uri": URI, "diagnostics": [] }));
}

#[test]
fn test_code_action_carries_typed_command() {
    let (proofreader, document) = round(
        "I go store",
        CorrectionPayload::structured("I go store", "I go to the store"),
    );
    let suggestions = proofreader.suggestions(&DocumentId::from(URI));
    assert_eq!(suggestions.len(), 1);

    let action = code_action_for_suggestion(URI, &document.snapshot(), &suggestions[0], SOURCE);
    assert_eq!(action["title"], "Apply suggestion");
    assert_eq!(action["kind"], "quickfix");
    assert_eq!(action["isPreferred"], true);

    let diagnostic = LspDiagnostic::from_value(&action["diagnostics"][0]).unwrap();
    assert_eq!(diagnostic.operation_id, suggestions[0].id);
    assert_eq!(diagnostic.message, "Insert \"to the \"");

    let command = ApplySuggestionCommand::from_value(&action["command"]).unwrap();
    assert_eq!(command, ApplySuggestionCommand::new(URI, suggestions[0].id));
}

#[test]
fn test_code_actions_filter_by_request_range() {
    let (proofreader, document) = round(
        "teh cat sat on teh mat",
        CorrectionPayload::structured("teh cat sat on teh mat", "the cat sat on the rug"),
    );
    let suggestions = proofreader.suggestions(&DocumentId::from(URI));
    assert_eq!(suggestions.len(), 3);

    let cursor = LspRange::new(LspPosition::new(0, 16), LspPosition::new(0, 16));
    let actions = code_actions_for_range(URI, &document.snapshot(), &suggestions, cursor, SOURCE);
    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0]["diagnostics"][0]["message"],
        "Change \"teh\" to \"the\""
    );
}

#[test]
fn test_executing_commands_applies_and_rebases() {
    let (mut proofreader, mut document) = round(
        "this is test sentenec",
        CorrectionPayload::tagged(
            "<orig>this</orig><edit>This</edit> is <orig>test</orig><edit>a test</edit> \
             <orig>sentenec</orig><edit>sentence.</edit>",
        ),
    );
    let doc = DocumentId::from(URI);
    let commands: Vec<Value> = proofreader
        .suggestions(&doc)
        .iter()
        .map(|s| ApplySuggestionCommand::new(URI, s.id).to_value())
        .collect();

    // The client echoes commands back in whatever order the user clicks them.
    for value in [&commands[1], &commands[2], &commands[0]] {
        let command = ApplySuggestionCommand::from_value(value).unwrap();
        assert!(command.execute(&mut proofreader, &mut document).is_applied());
    }
    assert_eq!(document.text(), "This is a test sentence.");
    assert_eq!(proofreader.tracker().state(&doc), PendingState::Idle);

    let stale = ApplySuggestionCommand::from_value(&commands[0]).unwrap();
    assert!(!stale.execute(&mut proofreader, &mut document).is_applied());
}

#[test]
fn test_workspace_edit_targets_current_range() {
    let (mut proofreader, mut document) = round(
        "a 👋 b c",
        CorrectionPayload::structured("a 👋 b c", "A 👋 B C"),
    );
    let doc = DocumentId::from(URI);
    let first = proofreader.suggestions(&doc)[0].id;
    assert!(proofreader.apply(&doc, first, &mut document).is_applied());

    let remaining = proofreader.suggestions(&doc);
    let edit = workspace_edit_for_operation(URI, &document.snapshot(), &remaining[0].operation);

    assert_eq!(
        edit["changes"][URI],
        json!([{
            "range": {
                "start": { "line": 0, "character": 5 },
                "end": { "line": 0, "character": 6 }
            },
            "newText": "B"
        }])
    );
    assert_eq!(edit.as_object().map(|o| o.len()), Some(1));
}

#[test]
fn test_code_action_request_range_is_read_in_utf16() {
    // UTF-16 column 6 is the end of "teh"; read as a char column it would be the start of "cat".
    let (proofreader, document) = round(
        "👋 teh cat",
        CorrectionPayload::structured("👋 teh cat", "👋 the cats"),
    );
    let suggestions = proofreader.suggestions(&DocumentId::from(URI));
    assert_eq!(suggestions.len(), 2);

    let cursor = LspRange::new(LspPosition::new(0, 6), LspPosition::new(0, 6));
    let actions = code_actions_for_range(URI, &document.snapshot(), &suggestions, cursor, SOURCE);
    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0]["diagnostics"][0]["message"],
        "Change \"teh\" to \"the\""
    );

    let tail = LspRange::new(LspPosition::new(0, 7), LspPosition::new(0, 10));
    let actions = code_actions_for_range(URI, &document.snapshot(), &suggestions, tail, SOURCE);
    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0]["diagnostics"][0]["message"],
        "Change \"cat\" to \"cats\""
    );
}
