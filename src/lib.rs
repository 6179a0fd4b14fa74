//! block-splice: transplant named code blocks between files
//!
//! Moves named, brace-delimited definitions (functions, methods) from a
//! "donor" text into a "target" text. Every other byte of the target stays
//! as it was.
//!
//! # Architecture
//!
//! All operations go through one primitive, [`BlockLocator::locate`]: find
//! the first `<keyword> <name>(` signature, then walk forward with a depth
//! counter to the brace that closes the body. Extraction slices that span out
//! of the donor; replacement splices new text over that span in the target.
//! Because both sides share the same locate step, the span taken and the span
//! replaced are always found the same way.
//!
//! The batch driver threads the target [`Document`] through one step per
//! name. Each step re-locates by signature, so earlier edits never leave
//! stale offsets behind.
//!
//! # Limitations
//!
//! This is not a parser. In the default [`LiteralMode::Naive`] braces inside
//! strings and comments are counted; [`LiteralMode::Aware`] skips common
//! C-family literals and comments.
//!
//! # Example
//!
//! ```
//! use block_splice::{transplant, BlockLocator, Document, Outcome};
//!
//! let donor = "function foo(x) { if (x) { return 1; } return 0; }";
//! let target = Document::new("a();\nfunction foo(x) { return -1; }\nb();\n");
//!
//! let report = transplant(&BlockLocator::default(), donor, target, &["foo", "bar"]);
//!
//! assert_eq!(report.outcome("foo"), Some(Outcome::Applied));
//! assert_eq!(report.outcome("bar"), Some(Outcome::ExtractFailed));
//! assert_eq!(
//!     report.document.as_str(),
//!     "a();\nfunction foo(x) { if (x) { return 1; } return 0; }\nb();\n"
//! );
//! ```

pub mod batch;
pub mod cache;
pub mod config;
pub mod document;
pub mod extract;
pub mod locate;
pub mod logging;
pub mod replace;
pub mod scan;

// Re-exports
pub use batch::{apply_plan, transplant, BatchReport, BlockOutcome, BlockState, Outcome, ReplacementPlan};
pub use config::{
    load_from_path, load_from_str, run_config, ConfigError, JobReport, RunError, RunMode,
    SpliceConfig,
};
pub use document::{Document, Span};
pub use extract::{extract, Block};
pub use locate::{BlockError, BlockLocator, ScanOptions};
pub use replace::{replace, Replaced};
pub use scan::LiteralMode;
