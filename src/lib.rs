//! # brace-outline
//!
//! Foldable region discovery for brace languages: `{ }` blocks, comment
//! runs, `#if`/`#region` directive arms, runs of import lines, and
//! `case` bodies.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! session  → Debounced re-runs, atomic list swap, change notification
//!   ↓
//! ide      → Collapsed labels, hover previews, folding ranges
//!   ↓
//! outline  → Token cursor, region grammar, flattening, diff
//!   ↓
//! classify → Token categories, Classifier trait, C# lexer
//!   ↓
//! base     → Primitives (TextSnapshot, LineIndex, SessionId)
//! ```
//!
//! ## Example
//!
//! ```
//! use brace_outline::{ParseOptions, RegionKind, SessionId, SnapshotVersion, TextSnapshot};
//!
//! let text = "class A\n{\n    void F() { }\n}\n";
//! let snapshot = TextSnapshot::new(SnapshotVersion(0), text);
//! let tokens = brace_outline::classify_text(text);
//! let list = brace_outline::outline(&snapshot, &tokens, &ParseOptions::default(), SessionId::DETACHED);
//!
//! assert_eq!(list.len(), 1);
//! assert_eq!(list.regions()[0].kind, RegionKind::Block);
//! ```

/// Foundation types: TextSnapshot, LineIndex, SessionId
pub mod base;

/// Token classification: categories, the Classifier trait, a C# lexer
pub mod classify;

/// Configuration shared by sessions
pub mod config;

/// Error types for line access and previews
pub mod error;

/// Presentation: collapsed text, hover previews, folding ranges
pub mod ide;

/// Region discovery: cursor, grammar engine, post-processing, diff
pub mod outline;

/// Per-document sessions with debounced re-runs
pub mod session;

// Re-export commonly needed items
pub use base::{LineCol, LineIndex, SessionId, SnapshotVersion, TextRange, TextSize, TextSnapshot};
pub use classify::{CSharpClassifier, Category, Classifier, Token, classify_text};
pub use config::OutlineConfig;
pub use error::{OutlineError, Result};
pub use outline::{ParseOptions, Region, RegionKind, RegionList, TextEdit, diff, outline};
pub use session::{OutlineSession, RegionsChanged};
