use crate::document::Span;
use crate::locate::{BlockError, BlockLocator};

/// A block located in a document, borrowing its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub span: Span,
    pub text: &'a str,
}

impl BlockLocator {
    /// Extract the first block named `name`, from its signature through the
    /// matching closing brace.
    pub fn extract<'a>(&self, document: &'a str, name: &str) -> Result<Block<'a>, BlockError> {
        let span = self.locate(document, name)?;
        Ok(Block {
            span,
            text: &document[span.range()],
        })
    }
}

/// Extract a block using the default scan options.
pub fn extract<'a>(document: &'a str, name: &str) -> Result<Block<'a>, BlockError> {
    BlockLocator::default().extract(document, name)
}
