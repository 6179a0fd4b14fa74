use crate::locate::BlockError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

/// Half-open byte range `[start, end)` of one located block.
///
/// Offsets always fall on UTF-8 character boundaries of the document they were
/// located in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Span {
    /// Starting byte offset (inclusive)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The full text of a file, treated as an immutable value.
///
/// Every edit goes through [`Document::splice`], which returns a new document
/// and leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a document in full.
    pub fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        fs::read_to_string(path).map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text covered by `span`, if it is a valid range of this document.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.range())
    }

    /// Build a new document with `span` replaced by `new_text`.
    ///
    /// Bytes before `span.start` and after `span.end` are copied unchanged.
    pub fn splice(&self, span: Span, new_text: &str) -> Result<Document, BlockError> {
        self.validate(span)?;

        let mut out = String::with_capacity(self.text.len() - span.len() + new_text.len());
        out.push_str(&self.text[..span.start]);
        out.push_str(new_text);
        out.push_str(&self.text[span.end..]);

        Ok(Document { text: out })
    }

    fn validate(&self, span: Span) -> Result<(), BlockError> {
        let invalid = || BlockError::InvalidSpan {
            start: span.start,
            end: span.end,
            len: self.text.len(),
        };

        if span.start > span.end || span.end > self.text.len() {
            return Err(invalid());
        }
        if !self.text.is_char_boundary(span.start) || !self.text.is_char_boundary(span.end) {
            return Err(invalid());
        }
        Ok(())
    }

    /// Write the document in full, atomically.
    ///
    /// Uses tempfile + fsync + rename, then bumps the mtime so file watchers
    /// and incremental builds notice the change.
    pub fn persist(&self, path: &Path) -> std::io::Result<()> {
        atomic_write(path, self.text.as_bytes())?;
        filetime::set_file_mtime(path, filetime::FileTime::now())
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the file on disk is left as it was.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // Same directory so the rename never crosses filesystems
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
