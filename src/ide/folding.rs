//! Folding ranges.
//!
//! Converts a [`RegionList`] into editor-protocol style folding ranges with
//! line/column positions and the collapsed label.

use super::collapsed::collapsed_text;
use crate::outline::{RegionKind, RegionList};

/// Folding range category, as understood by editor protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldingKind {
    Region,
    Comment,
    Imports,
}

impl From<RegionKind> for FoldingKind {
    fn from(kind: RegionKind) -> Self {
        match kind {
            RegionKind::Comment => FoldingKind::Comment,
            RegionKind::ImportRun => FoldingKind::Imports,
            RegionKind::Block
            | RegionKind::PreprocessorConditional
            | RegionKind::SwitchCaseGroup => FoldingKind::Region,
        }
    }
}

/// A folding range with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoldingRange {
    /// Start line (0-indexed)
    pub start_line: u32,
    /// Start column (0-indexed)
    pub start_col: u32,
    /// End line (0-indexed)
    pub end_line: u32,
    /// End column (0-indexed)
    pub end_col: u32,
    pub kind: FoldingKind,
    /// Text shown while folded
    pub collapsed_text: String,
}

/// Get folding ranges for a region list, ordered by start line.
pub fn folding_ranges(list: &RegionList) -> Vec<FoldingRange> {
    let snapshot = list.snapshot();
    let mut ranges: Vec<FoldingRange> = list
        .iter()
        .map(|region| {
            let start = snapshot.line_col(region.range.start());
            let end = snapshot.line_col(region.range.end());
            FoldingRange {
                start_line: start.line,
                start_col: start.col,
                end_line: end.line,
                end_col: end.col,
                kind: region.kind.into(),
                collapsed_text: collapsed_text(list, region),
            }
        })
        .collect();

    // Sort by start line
    ranges.sort_by_key(|r| r.start_line);

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{SessionId, SnapshotVersion, TextSnapshot};
    use crate::classify::classify_text;
    use crate::outline::{ParseOptions, outline};

    #[test]
    fn test_folding_ranges_for_file() {
        let text = "using A;\nusing B;\n\n// one\n// two\nclass C\n{\n    int x;\n}\n";
        let snapshot = TextSnapshot::new(SnapshotVersion(0), text);
        let list = outline(&snapshot, &classify_text(text), &ParseOptions::default(), SessionId::DETACHED);

        let ranges = folding_ranges(&list);
        let kinds: Vec<_> = ranges.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            [FoldingKind::Imports, FoldingKind::Comment, FoldingKind::Region]
        );

        let class = &ranges[2];
        assert_eq!((class.start_line, class.start_col), (5, 7));
        assert_eq!((class.end_line, class.end_col), (8, 1));
        assert_eq!(class.collapsed_text, "...");
    }
}
