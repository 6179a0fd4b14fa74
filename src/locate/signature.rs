//! Signature patterns: `<modifier>* <keyword> <name>(`.

use crate::locate::errors::BlockError;
use regex::Regex;

/// Check that `name` is a plain identifier (`[A-Za-z_$][A-Za-z0-9_$]*`).
pub fn validate_name(name: &str) -> Result<(), BlockError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(BlockError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Escape a possibly multi-word marker so inner runs of spaces match any
/// horizontal whitespace.
fn word_pattern(marker: &str) -> String {
    marker
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[ \t]+")
}

/// Build the regex source for a block signature.
///
/// The match starts at the first modifier (or the keyword) and ends just past
/// the `(` that opens the parameter list. Modifiers and keyword must share a
/// line; the name may follow on the next one.
pub fn signature_source(keywords: &[String], modifiers: &[String], name: &str) -> String {
    let keywords = keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| word_pattern(k))
        .collect::<Vec<_>>()
        .join("|");

    let modifiers: Vec<String> = modifiers
        .iter()
        .filter(|m| !m.trim().is_empty())
        .map(|m| word_pattern(m))
        .collect();

    let prefix = if modifiers.is_empty() {
        String::new()
    } else {
        format!(r"(?:(?:{})[ \t]+)*", modifiers.join("|"))
    };

    format!(
        r"\b{prefix}(?:{keywords})\s+{name}\s*\(",
        name = regex::escape(name)
    )
}

/// Compile the signature regex for `name`.
pub fn compile(keywords: &[String], modifiers: &[String], name: &str) -> Result<Regex, BlockError> {
    validate_name(name)?;
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(BlockError::Pattern {
            message: "no keywords configured".to_string(),
        });
    }

    let source = signature_source(keywords, modifiers, name);
    Regex::new(&source).map_err(|e| BlockError::Pattern {
        message: e.to_string(),
    })
}
