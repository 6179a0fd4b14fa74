use crate::document::{Document, Span};
use crate::locate::BlockError;
use serde::Serialize;
use std::fmt;

/// Terminal outcome for one block name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    ExtractFailed,
    ApplyFailed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::ExtractFailed => "extract_failed",
            Outcome::ApplyFailed => "apply_failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockOutcome {
    pub name: String,
    pub outcome: Outcome,
    /// Span of the inserted block in the output document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Applied, but the target already held identical text
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unchanged: bool,
    #[serde(skip)]
    pub error: Option<BlockError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BlockOutcome {
    pub fn applied(name: impl Into<String>, span: Span, unchanged: bool) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Applied,
            span: Some(span),
            unchanged,
            error: None,
            reason: None,
        }
    }

    pub fn failed(name: impl Into<String>, outcome: Outcome, error: BlockError) -> Self {
        Self {
            name: name.into(),
            outcome,
            span: None,
            unchanged: false,
            reason: Some(error.to_string()),
            error: Some(error),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }
}

/// Per-name outcomes of one batch plus the final document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use = "BatchReport carries the rewritten document"]
pub struct BatchReport {
    pub outcomes: Vec<BlockOutcome>,
    /// Byte length of the output document
    pub output_len: usize,
    #[serde(skip)]
    pub document: Document,
}

impl BatchReport {
    pub fn new(outcomes: Vec<BlockOutcome>, document: Document) -> Self {
        Self {
            outcomes,
            output_len: document.len(),
            document,
        }
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// True when at least one block was actually rewritten.
    pub fn changed(&self) -> bool {
        self.outcomes.iter().any(|o| o.is_applied() && !o.unchanged)
    }

    pub fn outcome(&self, name: &str) -> Option<Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.outcome)
    }
}
