//! End-to-end control flow.
//!
//! A [`Proofreader`] ties the stateless [`Aligner`] to the [`RebasingTracker`]: each completed
//! correction round is aligned and installed for its document (replacing the previous round),
//! presented as [`Suggestion`]s, and applied one at a time.

use crate::align::Aligner;
use crate::config::ProofreadConfig;
use crate::error::ConfigError;
use crate::line_index::LineIndex;
use crate::operation::EditOperation;
use crate::payload::CorrectionPayload;
use crate::span::TextSpan;
use crate::tracker::{ApplyOutcome, DocumentId, DocumentMutator, OperationId, RebasingTracker};

/// A pending operation ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Tracker id used to apply or dismiss the suggestion.
    pub id: OperationId,
    /// The operation with its current range.
    pub operation: EditOperation,
    /// One-line, display-only summary.
    pub description: String,
}

/// Outcome of one correction round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Ids of the installed operations, in emission order.
    pub installed: Vec<OperationId>,
}

impl RoundReport {
    /// Returns `true` when the round produced nothing; hosts typically tell the user that no
    /// suggestions were found.
    pub fn no_suggestions(&self) -> bool {
        self.installed.is_empty()
    }
}

/// Aligns correction rounds and tracks their operations across documents.
#[derive(Debug)]
pub struct Proofreader {
    config: ProofreadConfig,
    aligner: Aligner,
    tracker: RebasingTracker,
}

impl Proofreader {
    /// Create a proofreader, validating `config`.
    pub fn new(config: ProofreadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let aligner = Aligner::new(&config)?;
        Ok(Self {
            config,
            aligner,
            tracker: RebasingTracker::new(),
        })
    }

    /// Create a proofreader with the default configuration.
    pub fn with_default_config() -> Result<Self, ConfigError> {
        Self::new(ProofreadConfig::default())
    }

    /// Active configuration.
    pub fn config(&self) -> &ProofreadConfig {
        &self.config
    }

    /// The alignment engine.
    pub fn aligner(&self) -> &Aligner {
        &self.aligner
    }

    /// The tracker.
    pub fn tracker(&self) -> &RebasingTracker {
        &self.tracker
    }

    /// Mutable access to the tracker.
    pub fn tracker_mut(&mut self) -> &mut RebasingTracker {
        &mut self.tracker
    }

    /// Align `payload` against `span` and install the result as `document`'s pending set.
    ///
    /// `index` must be the snapshot `span` was captured from.
    pub fn submit(
        &mut self,
        document: &DocumentId,
        index: &LineIndex,
        span: &TextSpan,
        payload: &CorrectionPayload,
    ) -> RoundReport {
        let operations = self.aligner.align(span, payload, index);
        self.install(document, operations)
    }

    /// Like [`submit`](Self::submit), for a structured JSON payload. Malformed JSON installs an
    /// empty round.
    pub fn submit_json(
        &mut self,
        document: &DocumentId,
        index: &LineIndex,
        span: &TextSpan,
        json: &str,
    ) -> RoundReport {
        let operations = self.aligner.align_json(span, json, index);
        self.install(document, operations)
    }

    fn install(&mut self, document: &DocumentId, operations: Vec<EditOperation>) -> RoundReport {
        let installed = self.tracker.install(document, operations);
        if installed.is_empty() {
            tracing::info!(%document, "correction round produced no suggestions");
        } else {
            tracing::info!(%document, count = installed.len(), "installed correction round");
        }
        RoundReport { installed }
    }

    /// Pending suggestions of `document`, in emission order.
    pub fn suggestions(&self, document: &DocumentId) -> Vec<Suggestion> {
        self.tracker
            .pending(document)
            .iter()
            .map(|pending| Suggestion {
                id: pending.id,
                description: pending.operation.describe(self.config.description_width),
                operation: pending.operation.clone(),
            })
            .collect()
    }

    /// Apply one suggestion through `mutator` and rebase the rest.
    pub fn apply<M: DocumentMutator + ?Sized>(
        &mut self,
        document: &DocumentId,
        id: OperationId,
        mutator: &mut M,
    ) -> ApplyOutcome {
        self.tracker.apply_with(document, id, mutator)
    }

    /// Withdraw one suggestion without applying it.
    pub fn dismiss(&mut self, document: &DocumentId, id: OperationId) -> bool {
        self.tracker.dismiss(document, id).is_some()
    }

    /// Forget every pending suggestion of `document` (e.g. when it is closed).
    pub fn close(&mut self, document: &DocumentId) -> bool {
        self.tracker.clear(document)
    }
}
