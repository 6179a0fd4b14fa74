//! Batch driver: moves each block name through a small state machine.
//!
//! ```text
//! Pending ──extract──▶ Extracted ──replace──▶ Applied
//!    │                     │
//!    └──▶ ExtractFailed    └──▶ ApplyFailed
//! ```
//!
//! The current target document is threaded through the steps by value. Every
//! replacement re-locates its block by signature, so earlier edits can never
//! leave a later step with stale offsets.

use crate::batch::plan::ReplacementPlan;
use crate::batch::report::{BatchReport, BlockOutcome, Outcome};
use crate::document::{Document, Span};
use crate::locate::{BlockError, BlockLocator};

/// Progress of a single block name through the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockState<'d> {
    Pending {
        name: &'d str,
    },
    Extracted {
        name: &'d str,
        content: &'d str,
    },
    ExtractFailed {
        name: &'d str,
        error: BlockError,
    },
    Applied {
        name: &'d str,
        span: Span,
        unchanged: bool,
    },
    ApplyFailed {
        name: &'d str,
        error: BlockError,
    },
}

impl<'d> BlockState<'d> {
    /// Take one transition.
    ///
    /// `current` is the target document as of this step; the returned
    /// document is the one the next step must use. Terminal states return
    /// themselves and the document unchanged.
    pub fn advance(
        self,
        locator: &BlockLocator,
        donor: &'d str,
        current: Document,
    ) -> (BlockState<'d>, Document) {
        match self {
            BlockState::Pending { name } => match locator.extract(donor, name) {
                Ok(block) => (
                    BlockState::Extracted {
                        name,
                        content: block.text,
                    },
                    current,
                ),
                Err(error) => {
                    tracing::warn!(block = name, %error, "could not extract from donor");
                    (BlockState::ExtractFailed { name, error }, current)
                }
            },
            BlockState::Extracted { name, content } => {
                match locator.replace(&current, name, content) {
                    Ok(replaced) => {
                        tracing::info!(
                            block = name,
                            start = replaced.original.start,
                            end = replaced.original.end,
                            unchanged = replaced.unchanged,
                            "replaced block"
                        );
                        (
                            BlockState::Applied {
                                name,
                                span: replaced.inserted,
                                unchanged: replaced.unchanged,
                            },
                            replaced.document,
                        )
                    }
                    Err(error) => {
                        tracing::warn!(block = name, %error, "could not find block in target");
                        (BlockState::ApplyFailed { name, error }, current)
                    }
                }
            }
            terminal => (terminal, current),
        }
    }

    /// Run transitions until a terminal state is reached and report it.
    pub fn run(
        mut self,
        locator: &BlockLocator,
        donor: &'d str,
        mut current: Document,
    ) -> (BlockOutcome, Document) {
        loop {
            match self.into_outcome() {
                Ok(outcome) => return (outcome, current),
                Err(state) => (self, current) = state.advance(locator, donor, current),
            }
        }
    }

    /// The outcome of a terminal state, or the state itself if it can
    /// still advance.
    pub fn into_outcome(self) -> Result<BlockOutcome, Self> {
        match self {
            BlockState::Applied {
                name,
                span,
                unchanged,
            } => Ok(BlockOutcome::applied(name, span, unchanged)),
            BlockState::ExtractFailed { name, error } => {
                Ok(BlockOutcome::failed(name, Outcome::ExtractFailed, error))
            }
            BlockState::ApplyFailed { name, error } => {
                Ok(BlockOutcome::failed(name, Outcome::ApplyFailed, error))
            }
            pending @ (BlockState::Pending { .. } | BlockState::Extracted { .. }) => Err(pending),
        }
    }
}

/// Move every named block from `donor` into `target`, in order.
///
/// Failures are recorded per name and never stop the batch. If every name
/// fails the returned document equals `target`.
pub fn transplant<S: AsRef<str>>(
    locator: &BlockLocator,
    donor: &str,
    target: Document,
    names: &[S],
) -> BatchReport {
    let mut current = target;
    let mut outcomes = Vec::with_capacity(names.len());

    for name in names {
        let (outcome, next) =
            BlockState::Pending { name: name.as_ref() }.run(locator, donor, current);
        current = next;
        outcomes.push(outcome);
    }

    let report = BatchReport::new(outcomes, current);
    tracing::debug!(
        applied = report.applied_count(),
        failed = report.failed_count(),
        output_len = report.output_len,
        "batch finished"
    );
    report
}

/// Apply a prepared plan to `target`.
///
/// Every entry starts out already extracted, so the only possible failure is
/// `apply_failed`.
pub fn apply_plan(locator: &BlockLocator, target: Document, plan: &ReplacementPlan) -> BatchReport {
    let mut current = target;
    let mut outcomes = Vec::with_capacity(plan.len());

    for (name, content) in plan.iter() {
        let (outcome, next) =
            BlockState::Extracted { name, content }.run(locator, content, current);
        current = next;
        outcomes.push(outcome);
    }

    BatchReport::new(outcomes, current)
}
