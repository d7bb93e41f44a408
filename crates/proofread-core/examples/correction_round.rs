//! Correction round example
//!
//! Aligns a structured correction against one line of a document, lists the resulting
//! suggestions and applies them back to front.

use proofread_core::{CorrectionPayload, Document, DocumentId, Proofreader, TextSpan};

fn main() {
    let mut proofreader = Proofreader::with_default_config().unwrap();
    let mut document = Document::new("# Draft\nTheir going too the park tomorow\n");
    let doc_id = DocumentId::from("file:///draft.md");

    let index = document.snapshot();
    let span = TextSpan::capture_line(&index, 1).unwrap();
    let payload = CorrectionPayload::structured(
        span.text(),
        "They're going to the park tomorrow.",
    );

    let report = proofreader.submit(&doc_id, &index, &span, &payload);
    println!("{} suggestion(s):", report.installed.len());
    for suggestion in proofreader.suggestions(&doc_id) {
        let range = suggestion.operation.range;
        println!(
            "  {} {}:{}-{}:{}  {}",
            suggestion.id,
            range.start.line,
            range.start.column,
            range.end.line,
            range.end.column,
            suggestion.description
        );
    }

    for id in report.installed.into_iter().rev() {
        let outcome = proofreader.apply(&doc_id, id, &mut document);
        println!("apply {id}: applied = {}", outcome.is_applied());
    }

    println!("\nResult:\n{}", document.text());
}
