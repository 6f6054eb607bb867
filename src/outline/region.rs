//! Surfaced regions and the per-run region list.

use std::sync::Arc;

use super::tree::RegionKind;
use crate::base::{SessionId, SnapshotVersion, TextRange, TextSnapshot};

/// A complete, multi-line region as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub kind: RegionKind,
    pub range: TextRange,
    pub start_line: u32,
    pub end_line: u32,
    /// Nesting depth among surfaced regions; top level is 0
    pub depth: u32,
    /// Set for blocks whose start was moved above the brace line, or whose
    /// brace sits on the line after the preceding token.
    pub starts_from_prior_line: bool,
}

impl Region {
    /// Whether `[start_line, end_line]` intersects `[first, last]`.
    pub fn overlaps_lines(&self, first: u32, last: u32) -> bool {
        self.start_line <= last && first <= self.end_line
    }

    pub fn line_count(&self) -> u32 {
        self.end_line - self.start_line + 1
    }
}

/// Result of one outlining run.
///
/// Holds the snapshot the regions were computed from; previews built after the
/// document has moved on fall back to this pinned text.
#[derive(Debug, Clone)]
pub struct RegionList {
    session: SessionId,
    snapshot: TextSnapshot,
    regions: Arc<[Region]>,
}

impl RegionList {
    pub fn new(session: SessionId, snapshot: TextSnapshot, regions: Vec<Region>) -> Self {
        Self {
            session,
            snapshot,
            regions: regions.into(),
        }
    }

    /// An empty list for `snapshot`.
    pub fn empty(session: SessionId, snapshot: TextSnapshot) -> Self {
        Self::new(session, snapshot, Vec::new())
    }

    /// Session that produced the list.
    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn snapshot(&self) -> &TextSnapshot {
        &self.snapshot
    }

    pub fn version(&self) -> SnapshotVersion {
        self.snapshot.version()
    }

    /// Regions in pre-order: parents before children, siblings by start.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Regions whose line span intersects lines `first..=last`.
    pub fn overlapping(&self, first: u32, last: u32) -> impl Iterator<Item = &Region> + '_ {
        self.regions
            .iter()
            .filter(move |region| region.overlaps_lines(first, last))
    }
}

impl<'a> IntoIterator for &'a RegionList {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
