//! Depth-tracked delimiter matching.
//!
//! The scanner walks forward from an opening delimiter keeping a single
//! nesting counter, so arbitrarily deep nesting is handled with O(1) state.

use crate::scan::lexer::{CodeBytes, LiteralMode};

/// Why a scan stopped without finding the balancing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStop {
    /// Reached end of text with `depth` delimiters still open.
    Exhausted { depth: usize },
    /// Scanned more than the lookahead bound with `depth` delimiters still open.
    LimitReached { depth: usize },
}

impl ScanStop {
    pub fn depth(&self) -> usize {
        match self {
            ScanStop::Exhausted { depth } | ScanStop::LimitReached { depth } => *depth,
        }
    }
}

/// Find the delimiter that balances the `open` byte at `open_at`.
///
/// Returns the offset just past the balancing `close` byte. Bytes more than
/// `limit` past `open_at` are never examined.
pub fn find_matching(
    text: &str,
    open_at: usize,
    open: u8,
    close: u8,
    limit: usize,
    mode: LiteralMode,
) -> Result<usize, ScanStop> {
    debug_assert_eq!(text.as_bytes().get(open_at), Some(&open));

    let mut depth = 0usize;
    for (pos, b) in CodeBytes::new(text, open_at, mode) {
        if pos - open_at > limit {
            return Err(ScanStop::LimitReached { depth });
        }
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Ok(pos + 1);
            }
        }
    }

    Err(ScanStop::Exhausted { depth })
}

/// Find the `{` that opens a block body, starting right after a parameter list.
///
/// Anything may sit between the parameter list and the body (return types,
/// `where` clauses) except `;` or `}`, which mean the signature has no body
/// of its own.
pub fn find_body_open(text: &str, from: usize, limit: usize, mode: LiteralMode) -> Option<usize> {
    for (pos, b) in CodeBytes::new(text, from, mode) {
        if pos - from > limit {
            return None;
        }
        match b {
            b'{' => return Some(pos),
            b';' | b'}' => return None,
            _ => {}
        }
    }
    None
}
