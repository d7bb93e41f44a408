#![warn(missing_docs)]
//! Proofread Core - Headless Correction Alignment and Rebasing Engine
//!
//! # Overview
//!
//! `proofread-core` takes a correction produced by an external language model and turns it into
//! precisely located, independently applicable edit operations over the original text. As the user
//! applies them one at a time, the ranges of the remaining operations are rebased so they stay
//! valid while the document shifts.
//!
//! The crate performs no I/O: the network round trip to the correction provider, credential
//! handling and UI rendering all belong to the host.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Proofreader (round → suggestions → apply)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Rebasing Tracker (pending sets per doc)    │  ← Live State
//! ├─────────────────────────────────────────────┤
//! │  Alignment Engine (tagged pairs / tokens)   │  ← Diffing
//! ├─────────────────────────────────────────────┤
//! │  Tokenizer + Payload Model                  │  ← Input
//! ├─────────────────────────────────────────────┤
//! │  Text Position Model (Rope-based)           │  ← Coordinates
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use proofread_core::{CorrectionPayload, Document, DocumentId, Proofreader, TextSpan};
//!
//! let mut proofreader = Proofreader::with_default_config().unwrap();
//! let mut document = Document::new("this is test sentenec");
//! let doc_id = DocumentId::from("file:///notes.txt");
//!
//! let index = document.snapshot();
//! let span = TextSpan::capture_line(&index, 0).unwrap();
//! let payload = CorrectionPayload::tagged(
//!     "<orig>this</orig><edit>This</edit> is <orig>test</orig><edit>a test</edit> \
//!      <orig>sentenec</orig><edit>sentence.</edit>",
//! );
//!
//! let report = proofreader.submit(&doc_id, &index, &span, &payload);
//! assert_eq!(report.installed.len(), 3);
//!
//! for id in report.installed {
//!     assert!(proofreader.apply(&doc_id, id, &mut document).is_applied());
//! }
//! assert_eq!(document.text(), "This is a test sentence.");
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - offset ⇄ `(line, column)` conversion over an immutable snapshot
//! - [`token`] - lossless whitespace / punctuation / word tokenizer
//! - [`payload`] - correction payload shapes and tagged-pair extraction
//! - [`align`] - alignment engine producing [`EditOperation`]s
//! - [`tracker`] - per-document pending sets and range rebasing
//! - [`document`] - rope-backed live document
//! - [`proofreader`] - end-to-end control flow
//! - [`config`] - configuration
//! - [`error`] - error types

pub mod align;
pub mod config;
pub mod document;
pub mod error;
pub mod line_index;
pub mod operation;
pub mod payload;
pub mod proofreader;
pub mod span;
pub mod token;
pub mod tracker;

pub use align::Aligner;
pub use config::{AlignmentStrategy, MarkerConfig, ProofreadConfig};
pub use document::Document;
pub use error::{ConfigError, PayloadError, PositionError};
pub use line_index::{LineIndex, Position, TextRange};
pub use operation::{EditKind, EditOperation};
pub use payload::{CorrectionPayload, TagScanner, TaggedPair};
pub use proofreader::{Proofreader, RoundReport, Suggestion};
pub use span::TextSpan;
pub use token::{Token, TokenKind, Tokenizer};
pub use tracker::{
    AppliedOperation, ApplyOutcome, DocumentId, DocumentMutator, OperationId, PendingOperation,
    PendingSet, PendingState, RebasingTracker,
};
