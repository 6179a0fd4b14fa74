//! Named block location.
//!
//! A block is found in two steps: a regex finds the first signature
//! (`<modifier>* <keyword> <name>(`), then a depth-tracked scan walks the
//! parameter list and the body to the brace that brings nesting back to zero.

pub mod errors;
pub mod locator;
pub mod signature;

pub use errors::BlockError;
pub use locator::{BlockLocator, ScanOptions, DEFAULT_MAX_BLOCK_BYTES, DEFAULT_MAX_SIGNATURE_BYTES};
pub use signature::validate_name;
