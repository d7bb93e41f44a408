//! Rebasing tracker.
//!
//! Owns the pending operations offered to the user, one [`PendingSet`] per document. Each time an
//! operation is applied, the ranges of its siblings are rebased so they keep pointing at the text
//! they were created for.
//!
//! Rebasing is deliberately column-only: when an operation is applied, later operations that
//! start on the same line (strictly after the applied start column) move by the applied
//! operation's length delta. Operations on other lines are never touched, so an applied
//! replacement that adds or removes line breaks leaves later lines stale.

use crate::line_index::TextRange;
use crate::operation::EditOperation;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of a pending operation, unique within one [`RebasingTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(u64);

impl OperationId {
    /// Rebuild an id previously obtained from [`get`](Self::get), e.g. one that made a round
    /// trip through an editor command. Unknown ids are simply not pending.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-provided document identity (typically a URI).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An operation waiting to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    /// Tracker-assigned id.
    pub id: OperationId,
    /// The operation, with its range rebased to the current document.
    pub operation: EditOperation,
}

/// Per-document tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    /// No operations pending.
    Idle,
    /// This many operations pending.
    Pending(usize),
}

/// Bookkeeping report for an applied operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOperation {
    /// The applied operation's id.
    pub id: OperationId,
    /// The applied operation (range as it was when applied).
    pub operation: EditOperation,
    /// Replacement length minus original length, in characters.
    pub length_delta: isize,
    /// Siblings removed because they targeted exactly the same range.
    pub collapsed: Vec<OperationId>,
    /// Siblings whose ranges were shifted.
    pub shifted: Vec<OperationId>,
}

/// Result of an apply request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The operation was applied and its siblings rebased.
    Applied(AppliedOperation),
    /// The operation is no longer pending (already applied or invalidated).
    NothingToApply,
    /// The document refused the replacement; pending state is unchanged.
    Rejected,
}

impl ApplyOutcome {
    /// Returns `true` for [`ApplyOutcome::Applied`].
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Performs the actual text replacement for an applied operation.
pub trait DocumentMutator {
    /// Replace `range` with `text`, returning `true` on success.
    fn replace(&mut self, range: TextRange, text: &str) -> bool;
}

/// The pending operations of one document, in installation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSet {
    operations: Vec<PendingOperation>,
}

impl PendingSet {
    /// Number of pending operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Current state.
    pub fn state(&self) -> PendingState {
        if self.operations.is_empty() {
            PendingState::Idle
        } else {
            PendingState::Pending(self.operations.len())
        }
    }

    /// Pending operations in installation order.
    pub fn operations(&self) -> &[PendingOperation] {
        &self.operations
    }

    /// Look up a pending operation.
    pub fn get(&self, id: OperationId) -> Option<&EditOperation> {
        self.operations
            .iter()
            .find(|pending| pending.id == id)
            .map(|pending| &pending.operation)
    }

    fn remove(&mut self, id: OperationId) -> Option<EditOperation> {
        let at = self.operations.iter().position(|pending| pending.id == id)?;
        Some(self.operations.remove(at).operation)
    }

    /// Remove `id` and rebase every remaining operation against it.
    fn apply(&mut self, id: OperationId) -> Option<AppliedOperation> {
        let operation = self.remove(id)?;
        let applied = operation.range;
        let length_delta = operation.length_delta();

        let mut collapsed = Vec::new();
        let mut shifted = Vec::new();
        self.operations.retain_mut(|pending| {
            let range = &mut pending.operation.range;
            if *range == applied {
                tracing::trace!(id = %pending.id, "dropping operation on the applied range");
                collapsed.push(pending.id);
                return false;
            }

            if range.start.line == applied.start.line && range.start.column > applied.start.column
            {
                range.start.column = range.start.column.saturating_add_signed(length_delta);
                range.end.column = range.end.column.saturating_add_signed(length_delta);
                tracing::trace!(id = %pending.id, length_delta, "rebased operation");
                shifted.push(pending.id);
            }
            true
        });

        Some(AppliedOperation {
            id,
            operation,
            length_delta,
            collapsed,
            shifted,
        })
    }
}

/// Owns the [`PendingSet`] of every document with pending operations.
///
/// Documents with nothing pending are not stored; they report [`PendingState::Idle`].
#[derive(Debug, Default)]
pub struct RebasingTracker {
    next_id: u64,
    documents: BTreeMap<DocumentId, PendingSet>,
}

impl RebasingTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents with pending operations.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document has pending operations.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents that currently have pending operations.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentId> {
        self.documents.keys()
    }

    /// Replace the pending set of `document` with `operations`.
    ///
    /// Whatever was pending before is discarded. Installing an empty list returns the document to
    /// [`PendingState::Idle`].
    pub fn install(
        &mut self,
        document: &DocumentId,
        operations: Vec<EditOperation>,
    ) -> Vec<OperationId> {
        if operations.is_empty() {
            self.documents.remove(document);
            return Vec::new();
        }

        let operations: Vec<PendingOperation> = operations
            .into_iter()
            .map(|operation| {
                let id = OperationId(self.next_id);
                self.next_id = self.next_id.saturating_add(1);
                PendingOperation { id, operation }
            })
            .collect();
        let ids = operations.iter().map(|pending| pending.id).collect();

        self.documents
            .insert(document.clone(), PendingSet { operations });
        ids
    }

    /// The pending set of `document`, if any.
    pub fn pending_set(&self, document: &DocumentId) -> Option<&PendingSet> {
        self.documents.get(document)
    }

    /// Pending operations of `document` (empty when idle).
    pub fn pending(&self, document: &DocumentId) -> &[PendingOperation] {
        self.documents
            .get(document)
            .map(PendingSet::operations)
            .unwrap_or(&[])
    }

    /// Look up one pending operation.
    pub fn get(&self, document: &DocumentId, id: OperationId) -> Option<&EditOperation> {
        self.documents.get(document)?.get(id)
    }

    /// Current state of `document`.
    pub fn state(&self, document: &DocumentId) -> PendingState {
        self.documents
            .get(document)
            .map_or(PendingState::Idle, PendingSet::state)
    }

    /// Record that `id` has been applied to the live document and rebase its siblings.
    ///
    /// The caller performs the replacement itself; this only updates bookkeeping, assuming the
    /// replacement succeeded.
    pub fn apply(&mut self, document: &DocumentId, id: OperationId) -> ApplyOutcome {
        let Some(set) = self.documents.get_mut(document) else {
            tracing::debug!(%document, %id, "apply on idle document");
            return ApplyOutcome::NothingToApply;
        };
        let Some(applied) = set.apply(id) else {
            tracing::debug!(%document, %id, "operation is no longer pending");
            return ApplyOutcome::NothingToApply;
        };

        if set.is_empty() {
            self.documents.remove(document);
        }
        ApplyOutcome::Applied(applied)
    }

    /// Hand the operation to `mutator` and, if it reports success, [`apply`](Self::apply) it.
    pub fn apply_with<M: DocumentMutator + ?Sized>(
        &mut self,
        document: &DocumentId,
        id: OperationId,
        mutator: &mut M,
    ) -> ApplyOutcome {
        let Some(operation) = self.get(document, id) else {
            tracing::debug!(%document, %id, "operation is no longer pending");
            return ApplyOutcome::NothingToApply;
        };

        if !mutator.replace(operation.range, &operation.replacement_text) {
            tracing::debug!(%document, %id, "document rejected the replacement");
            return ApplyOutcome::Rejected;
        }
        self.apply(document, id)
    }

    /// Withdraw one operation without applying it.
    pub fn dismiss(&mut self, document: &DocumentId, id: OperationId) -> Option<EditOperation> {
        let set = self.documents.get_mut(document)?;
        let operation = set.remove(id)?;
        if set.is_empty() {
            self.documents.remove(document);
        }
        Some(operation)
    }

    /// Drop every pending operation of `document`. Returns `true` if anything was pending.
    pub fn clear(&mut self, document: &DocumentId) -> bool {
        self.documents.remove(document).is_some()
    }
}
