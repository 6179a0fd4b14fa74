use serde::Deserialize;
use std::fmt;

/// How the scanner treats delimiters inside string literals and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralMode {
    /// Every byte counts; `"{"` opens a block like any other brace.
    #[default]
    Naive,
    /// Skip `"..."`, `'...'`, `` `...` ``, `// ...` and `/* ... */`.
    ///
    /// This is a lexical approximation for C-family and JavaScript-like
    /// sources. Regex literals and Rust lifetimes are not recognised.
    Aware,
}

impl fmt::Display for LiteralMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralMode::Naive => write!(f, "naive"),
            LiteralMode::Aware => write!(f, "aware"),
        }
    }
}

/// Iterator over the bytes of a text that are significant to delimiter
/// matching, paired with their offsets.
///
/// In [`LiteralMode::Naive`] this yields every byte. In
/// [`LiteralMode::Aware`] literal and comment bodies (including their quote
/// and comment markers) are skipped.
#[derive(Debug, Clone)]
pub struct CodeBytes<'a> {
    bytes: &'a [u8],
    pos: usize,
    mode: LiteralMode,
}

impl<'a> CodeBytes<'a> {
    pub fn new(text: &'a str, from: usize, mode: LiteralMode) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: from,
            mode,
        }
    }

    fn skip_quoted(&self, open_at: usize, quote: u8) -> usize {
        let mut i = open_at + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return i + 1,
                _ => i += 1,
            }
        }
        self.bytes.len()
    }

    fn skip_line_comment(&self, open_at: usize) -> usize {
        self.bytes[open_at..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |offset| open_at + offset)
    }

    fn skip_block_comment(&self, open_at: usize) -> usize {
        self.bytes[open_at + 2..]
            .windows(2)
            .position(|w| w == b"*/")
            .map_or(self.bytes.len(), |offset| open_at + 2 + offset + 2)
    }
}

impl Iterator for CodeBytes<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let at = self.pos;
            let b = *self.bytes.get(at)?;

            if self.mode == LiteralMode::Aware {
                let next = self.bytes.get(at + 1).copied();
                match (b, next) {
                    (b'"' | b'\'' | b'`', _) => {
                        self.pos = self.skip_quoted(at, b);
                        continue;
                    }
                    (b'/', Some(b'/')) => {
                        self.pos = self.skip_line_comment(at);
                        continue;
                    }
                    (b'/', Some(b'*')) => {
                        self.pos = self.skip_block_comment(at);
                        continue;
                    }
                    _ => {}
                }
            }

            self.pos = at + 1;
            return Some((at, b));
        }
    }
}
