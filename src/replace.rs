use crate::document::{Document, Span};
use crate::locate::{BlockError, BlockLocator};

/// Result of replacing one block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Replaced carries the new document"]
pub struct Replaced {
    /// The rewritten document
    pub document: Document,
    /// Span of the block in the input document
    pub original: Span,
    /// Span of the inserted text in the rewritten document
    pub inserted: Span,
    /// The block already had exactly the replacement text
    pub unchanged: bool,
}

impl BlockLocator {
    /// Replace the first block named `name` in `document` with `replacement`.
    ///
    /// Everything outside the located span is copied byte-for-byte. The input
    /// document is left as is.
    pub fn replace(
        &self,
        document: &Document,
        name: &str,
        replacement: &str,
    ) -> Result<Replaced, BlockError> {
        let original = self.locate(document.as_str(), name)?;
        let inserted = Span::new(original.start, original.start + replacement.len());

        if document.slice(original) == Some(replacement) {
            return Ok(Replaced {
                document: document.clone(),
                original,
                inserted,
                unchanged: true,
            });
        }

        Ok(Replaced {
            document: document.splice(original, replacement)?,
            original,
            inserted,
            unchanged: false,
        })
    }
}

/// Replace a block using the default scan options.
pub fn replace(document: &Document, name: &str, replacement: &str) -> Result<Replaced, BlockError> {
    BlockLocator::default().replace(document, name, replacement)
}
