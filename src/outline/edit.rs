//! Text edits and translation of offsets across them.

use crate::base::{TextRange, TextSize};

/// Which side of an insertion point an offset sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Stay before text inserted at the offset.
    Left,
    /// Move past text inserted at the offset.
    Right,
}

/// Replacement of `range` (in the old text) by `new_len` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextEdit {
    pub range: TextRange,
    pub new_len: TextSize,
}

impl TextEdit {
    pub fn new(range: TextRange, new_len: TextSize) -> Self {
        Self { range, new_len }
    }

    pub fn insert(at: TextSize, len: TextSize) -> Self {
        Self::new(TextRange::empty(at), len)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::new(range, TextSize::from(0))
    }

    /// Map an offset in the old text to the new text.
    pub fn translate_offset(&self, offset: TextSize, bias: Bias) -> TextSize {
        let start = self.range.start();
        let end = self.range.end();
        if offset < start {
            offset
        } else if offset > end {
            // end >= start, so this never underflows
            offset - self.range.len() + self.new_len
        } else if offset == end && start < end {
            start + self.new_len
        } else {
            match bias {
                Bias::Right => start + self.new_len,
                Bias::Left => start,
            }
        }
    }

    /// Map a range in the old text to the new text.
    ///
    /// Edges are exclusive: text inserted exactly at a range boundary lands
    /// outside the range. A range swallowed by the edit collapses to the edit
    /// point.
    pub fn translate_range(&self, range: TextRange) -> TextRange {
        let start = self.translate_offset(range.start(), Bias::Right);
        let end = self.translate_offset(range.end(), Bias::Left);
        TextRange::new(start, end.max(start))
    }
}

/// Apply `edits` in order to `range`.
pub fn translate_through(range: TextRange, edits: &[TextEdit]) -> TextRange {
    edits
        .iter()
        .fold(range, |range, edit| edit.translate_range(range))
}
