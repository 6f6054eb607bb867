//! Foundation types for the outliner.
//!
//! This module provides the text model everything else is built on:
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`TextSnapshot`], [`SnapshotVersion`] - Versioned document text
//! - [`SessionId`] - Opaque owner handle for region lists
//!
//! This module has NO dependencies on other outline modules besides `error`.

mod session_id;
mod snapshot;
mod span;

pub use session_id::SessionId;
pub use snapshot::{Line, SnapshotVersion, TextSnapshot};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
