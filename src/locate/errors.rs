use thiserror::Error;

/// Why a named block could not be located or spliced.
///
/// Every variant is recoverable: callers treat all of them as "block absent"
/// and decide for themselves whether that matters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("invalid block name '{name}': expected an identifier")]
    InvalidName { name: String },

    #[error("no signature found for '{name}'")]
    NotFound { name: String },

    #[error("signature of '{name}' at byte {offset} has no parameter list or body within the lookahead bound")]
    MalformedSignature { name: String, offset: usize },

    #[error("block '{name}' opened at byte {offset} is unbalanced ({depth} delimiters still open)")]
    UnbalancedBlock {
        name: String,
        offset: usize,
        depth: usize,
    },

    #[error("invalid span [{start}, {end}) in document of length {len}")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("failed to build signature pattern: {message}")]
    Pattern { message: String },
}

impl BlockError {
    /// True for the three "absent" outcomes a batch reports per name.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            BlockError::NotFound { .. }
                | BlockError::MalformedSignature { .. }
                | BlockError::UnbalancedBlock { .. }
        )
    }
}
