//! Source text positions, ranges and line addressing.

use std::fmt;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// Index for converting between byte offsets and lines.
///
/// Understands both `\n` and `\r\n` terminators. The text after the last
/// terminator always forms a (possibly empty) final line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    /// Byte offset of the end of each line, terminator excluded
    line_ends: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let mut line_ends = Vec::new();
        let bytes = text.as_bytes();

        for (offset, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                let end = if offset > 0 && bytes[offset - 1] == b'\r' {
                    offset - 1
                } else {
                    offset
                };
                line_ends.push(TextSize::from(end as u32));
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        let len = TextSize::of(text);
        line_ends.push(len);

        Self {
            line_starts,
            line_ends,
            len,
        }
    }

    /// Line number containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1) as u32
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self.line_of(offset);
        let line_start = self.line_starts[line as usize];
        let col = offset.checked_sub(line_start).unwrap_or_default();

        LineCol {
            line,
            col: col.into(),
        }
    }

    /// Convert a line/column position to a byte offset.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line_start = self.line_starts.get(line_col.line as usize)?;
        Some(*line_start + TextSize::from(line_col.col))
    }

    /// Range of a line's content, terminator excluded.
    pub fn line_range(&self, line: u32) -> Option<TextRange> {
        let start = *self.line_starts.get(line as usize)?;
        let end = *self.line_ends.get(line as usize)?;
        Some(TextRange::new(start, end))
    }

    /// Range of a line including its terminator.
    pub fn line_range_with_break(&self, line: u32) -> Option<TextRange> {
        let start = *self.line_starts.get(line as usize)?;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .copied()
            .unwrap_or(self.len);
        Some(TextRange::new(start, end))
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Length of the indexed text.
    pub fn text_len(&self) -> TextSize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_display() {
        let pos = LineCol::new(0, 0);
        assert_eq!(format!("{}", pos), "1:1");

        let pos = LineCol::new(5, 10);
        assert_eq!(format!("{}", pos), "6:11");
    }

    #[test]
    fn test_line_index_single_line() {
        let index = LineIndex::new("hello world");

        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::from(5)), LineCol::new(0, 5));
    }

    #[test]
    fn test_line_index_multi_line() {
        let index = LineIndex::new("hello\nworld\n!");

        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::from(5)), LineCol::new(0, 5));
        assert_eq!(index.line_col(TextSize::from(6)), LineCol::new(1, 0));
        assert_eq!(index.line_col(TextSize::from(11)), LineCol::new(1, 5));
        assert_eq!(index.line_col(TextSize::from(12)), LineCol::new(2, 0));
    }

    #[test]
    fn test_line_index_offset() {
        let index = LineIndex::new("hello\nworld");

        assert_eq!(index.offset(LineCol::new(0, 0)), Some(TextSize::from(0)));
        assert_eq!(index.offset(LineCol::new(1, 0)), Some(TextSize::from(6)));
        assert_eq!(index.offset(LineCol::new(1, 3)), Some(TextSize::from(9)));
        assert_eq!(index.offset(LineCol::new(2, 0)), None);
    }

    #[test]
    fn test_line_ranges_crlf() {
        let index = LineIndex::new("ab\r\ncd\n");

        assert_eq!(index.line_count(), 3);
        assert_eq!(
            index.line_range(0),
            Some(TextRange::new(0.into(), 2.into()))
        );
        assert_eq!(
            index.line_range_with_break(0),
            Some(TextRange::new(0.into(), 4.into()))
        );
        assert_eq!(
            index.line_range(1),
            Some(TextRange::new(4.into(), 6.into()))
        );
        assert_eq!(index.line_range(2), Some(TextRange::empty(7.into())));
        assert_eq!(index.line_range(3), None);
    }

    #[test]
    fn test_line_of_terminator_belongs_to_line() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.line_of(TextSize::from(1)), 0);
        assert_eq!(index.line_of(TextSize::from(2)), 1);
        assert_eq!(index.line_of(TextSize::from(99)), 1);
    }
}
