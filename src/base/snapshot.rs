//! Immutable, versioned document snapshots.

use std::fmt;
use std::sync::Arc;

use super::span::{LineCol, LineIndex, TextRange, TextSize};
use crate::error::{OutlineError, Result};

/// Version number of a document snapshot.
///
/// Versions only ever grow; two snapshots with the same version of the same
/// document hold the same text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotVersion(pub u32);

impl SnapshotVersion {
    /// The version following this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One line of a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// 0-indexed line number
    pub number: u32,
    /// Content range, terminator excluded
    pub range: TextRange,
    /// Content range including the terminator
    pub range_with_break: TextRange,
}

impl Line {
    #[inline]
    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    #[inline]
    pub fn end(&self) -> TextSize {
        self.range.end()
    }
}

/// An immutable view of the document text at one version.
///
/// Cloning is cheap: the text and line index are shared.
#[derive(Clone)]
pub struct TextSnapshot {
    version: SnapshotVersion,
    text: Arc<str>,
    lines: Arc<LineIndex>,
}

impl TextSnapshot {
    /// Create a snapshot of `text` at `version`.
    pub fn new(version: SnapshotVersion, text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let lines = Arc::new(LineIndex::new(&text));
        Self {
            version,
            text,
            lines,
        }
    }

    pub fn version(&self) -> SnapshotVersion {
        self.version
    }

    /// The whole document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> TextSize {
        self.lines.text_len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> u32 {
        self.lines.line_count()
    }

    /// Text covered by `range`.
    pub fn slice(&self, range: TextRange) -> Result<&str> {
        if range.end() > self.len() {
            return Err(OutlineError::OutOfBounds {
                range,
                len: self.len(),
            });
        }
        self.text
            .get(std::ops::Range::<usize>::from(range))
            .ok_or(OutlineError::OutOfBounds {
                range,
                len: self.len(),
            })
    }

    /// Line number containing `offset`.
    pub fn line_number(&self, offset: TextSize) -> u32 {
        self.lines.line_of(offset)
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.lines.line_col(offset)
    }

    /// Look up a line by number.
    pub fn line(&self, number: u32) -> Result<Line> {
        let no_such_line = || OutlineError::NoSuchLine {
            line: number,
            count: self.line_count(),
        };
        let range = self.lines.line_range(number).ok_or_else(no_such_line)?;
        let range_with_break = self
            .lines
            .line_range_with_break(number)
            .ok_or_else(no_such_line)?;
        Ok(Line {
            number,
            range,
            range_with_break,
        })
    }

    /// The line containing `offset`.
    pub fn line_at(&self, offset: TextSize) -> Line {
        let number = self.line_number(offset);
        // line_of never yields a number past the last line
        let range = self
            .lines
            .line_range(number)
            .unwrap_or_else(|| TextRange::empty(self.len()));
        let range_with_break = self.lines.line_range_with_break(number).unwrap_or(range);
        Line {
            number,
            range,
            range_with_break,
        }
    }

    /// Raw text of a line, terminator excluded.
    pub fn line_text(&self, number: u32) -> Result<&str> {
        let line = self.line(number)?;
        self.slice(line.range)
    }

    /// Raw text of a line including its terminator.
    pub fn line_text_with_break(&self, number: u32) -> Result<&str> {
        let line = self.line(number)?;
        self.slice(line.range_with_break)
    }

    /// Trimmed text of the line containing `offset`.
    pub fn trimmed_line_at(&self, offset: TextSize) -> &str {
        let line = self.line_at(offset);
        self.slice(line.range).map(str::trim).unwrap_or_default()
    }

    /// Whether only whitespace lies between the start of `offset`'s line and `offset`.
    pub fn only_whitespace_before(&self, offset: TextSize) -> bool {
        let line = self.line_at(offset);
        if offset < line.start() {
            return true;
        }
        self.slice(TextRange::new(line.start(), offset))
            .map(|s| s.trim().is_empty())
            .unwrap_or(false)
    }

    /// The position "just before" `offset`: the end of the previous line when
    /// `offset` is the first non-blank position of its line, else `offset`.
    pub fn end_before(&self, offset: TextSize) -> TextSize {
        let line = self.line_at(offset);
        if line.number > 0 && self.only_whitespace_before(offset) {
            self.lines
                .line_range(line.number - 1)
                .map_or(offset, |prev| prev.end())
        } else {
            offset
        }
    }
}

impl fmt::Debug for TextSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSnapshot")
            .field("version", &self.version)
            .field("len", &self.len())
            .field("lines", &self.line_count())
            .finish()
    }
}
