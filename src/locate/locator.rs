use crate::cache;
use crate::document::Span;
use crate::locate::errors::BlockError;
use crate::scan::{find_body_open, find_matching, CodeBytes, LiteralMode};
use regex::{Match, Regex};
use serde::Deserialize;

pub const DEFAULT_MAX_SIGNATURE_BYTES: usize = 4 * 1024;
pub const DEFAULT_MAX_BLOCK_BYTES: usize = 1024 * 1024;

/// How signatures are recognised and how far scans may run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanOptions {
    /// Keywords that introduce a block, e.g. `function` or `fn`
    pub keywords: Vec<String>,
    /// Words allowed before the keyword, included in the located span
    pub modifiers: Vec<String>,
    /// Whether string literals and comments are skipped while matching
    pub literals: LiteralMode,
    /// Lookahead bound for the parameter list and the gap before the body
    pub max_signature_bytes: usize,
    /// Lookahead bound for the body, measured from its opening brace
    pub max_block_bytes: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            keywords: vec!["function".to_string()],
            modifiers: vec!["export".to_string(), "async".to_string()],
            literals: LiteralMode::Naive,
            max_signature_bytes: DEFAULT_MAX_SIGNATURE_BYTES,
            max_block_bytes: DEFAULT_MAX_BLOCK_BYTES,
        }
    }
}

impl ScanOptions {
    pub fn with_literals(mut self, literals: LiteralMode) -> Self {
        self.literals = literals;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }
}

/// Locates named blocks by signature match plus depth-tracked scanning.
///
/// Extraction and replacement both go through [`BlockLocator::locate`], so the
/// span removed from a target is found exactly the way the span taken from a
/// donor is.
#[derive(Debug, Clone, Default)]
pub struct BlockLocator {
    options: ScanOptions,
}

impl BlockLocator {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Locate the first block named `name` in `text`.
    ///
    /// The span runs from the start of the signature to just past the brace
    /// that closes the body.
    pub fn locate(&self, text: &str, name: &str) -> Result<Span, BlockError> {
        let opts = &self.options;
        let pattern = cache::signature_pattern(&opts.keywords, &opts.modifiers, name)?;

        let signature = self
            .first_signature(text, &pattern)
            .ok_or_else(|| BlockError::NotFound {
                name: name.to_string(),
            })?;
        let start = signature.start();
        let malformed = || BlockError::MalformedSignature {
            name: name.to_string(),
            offset: start,
        };

        // The pattern ends with the `(` of the parameter list
        let paren = signature.end() - 1;
        let params_end = find_matching(
            text,
            paren,
            b'(',
            b')',
            opts.max_signature_bytes,
            opts.literals,
        )
        .map_err(|_| malformed())?;

        let body_open = find_body_open(text, params_end, opts.max_signature_bytes, opts.literals)
            .ok_or_else(malformed)?;

        let end = find_matching(
            text,
            body_open,
            b'{',
            b'}',
            opts.max_block_bytes,
            opts.literals,
        )
        .map_err(|stop| BlockError::UnbalancedBlock {
            name: name.to_string(),
            offset: body_open,
            depth: stop.depth(),
        })?;

        tracing::debug!(block = name, start, end, "located block");
        Ok(Span::new(start, end))
    }

    /// First signature match that sits in code.
    ///
    /// In naive mode that is simply the first match. In aware mode matches
    /// starting inside a literal or comment are skipped.
    fn first_signature<'t>(&self, text: &'t str, pattern: &Regex) -> Option<Match<'t>> {
        if self.options.literals == LiteralMode::Naive {
            return pattern.find(text);
        }

        let mut code = CodeBytes::new(text, 0, self.options.literals).peekable();
        pattern.find_iter(text).find(|m| {
            while code.next_if(|&(pos, _)| pos < m.start()).is_some() {}
            matches!(code.peek(), Some(&(pos, _)) if pos == m.start())
        })
    }
}
