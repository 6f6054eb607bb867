//! Errors surfaced by line access and preview construction.
//!
//! The region engine itself never fails: unmatched or inconsistent input
//! degrades to "still open" or "skip". Only APIs that address text by
//! position can report a problem.

use thiserror::Error;

use crate::base::{SnapshotVersion, TextRange, TextSize};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    /// A region computed against one snapshot was used with another.
    #[error("region was computed against {region} but the document is at {current}")]
    StaleSnapshot {
        region: SnapshotVersion,
        current: SnapshotVersion,
    },

    #[error("range {range:?} lies outside the document ({len:?} bytes)")]
    OutOfBounds { range: TextRange, len: TextSize },

    #[error("line {line} does not exist (document has {count} lines)")]
    NoSuchLine { line: u32, count: u32 },
}

pub type Result<T, E = OutlineError> = std::result::Result<T, E>;
