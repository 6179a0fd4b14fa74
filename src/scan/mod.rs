//! Byte-level scanning primitives for delimiter matching.
//!
//! Scanning works on raw UTF-8 bytes. Every delimiter the scanner cares about
//! is ASCII, so any offset it reports is also a character boundary.

pub mod depth;
pub mod lexer;

pub use depth::{find_body_open, find_matching, ScanStop};
pub use lexer::{CodeBytes, LiteralMode};
