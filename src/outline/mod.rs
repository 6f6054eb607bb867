//! Region discovery.
//!
//! Pipeline for one snapshot:
//!
//! ```text
//! tokens ─► TokenCursor ─► grammar::parse ─► RegionTree ─► flatten ─► RegionList
//! ```
//!
//! and between two runs, [`diff`] reports which part of the document's
//! outlining changed.

mod cursor;
mod diff;
mod edit;
mod flatten;
mod grammar;
mod options;
mod region;
mod tree;

pub use cursor::TokenCursor;
pub use diff::diff;
pub use edit::{Bias, TextEdit, translate_through};
pub use flatten::flatten;
pub use grammar::parse;
pub use options::ParseOptions;
pub use region::{Region, RegionList};
pub use tree::{RegionId, RegionKind, RegionNode, RegionTree};

use crate::base::{SessionId, TextSnapshot};
use crate::classify::Token;

/// Parse `tokens` and flatten the result in one step.
pub fn outline(
    snapshot: &TextSnapshot,
    tokens: &[Token],
    options: &ParseOptions,
    session: SessionId,
) -> RegionList {
    let tree = parse(snapshot, tokens, options);
    flatten(&tree, snapshot, session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SnapshotVersion;
    use crate::classify::classify_text;

    fn regions(text: &str) -> RegionList {
        let snapshot = TextSnapshot::new(SnapshotVersion(0), text);
        outline(&snapshot, &classify_text(text), &ParseOptions::default(), SessionId::DETACHED)
    }

    #[test]
    fn test_using_run_then_namespace() {
        let list = regions("using A;\nusing B.C;\n\nnamespace N\n{\n  class X { }\n}\n");
        let kinds: Vec<_> = list.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, [RegionKind::ImportRun, RegionKind::Block]);

        let imports = &list.regions()[0];
        assert_eq!((imports.start_line, imports.end_line), (0, 1));
        let namespace = &list.regions()[1];
        assert_eq!(namespace.start_line, 3);
        assert!(namespace.starts_from_prior_line);
    }

    #[test]
    fn test_doc_comment_run_stops_before_code() {
        let list = regions("/// <summary>\n/// Adds.\n/// </summary>\nint Add();\n");
        assert_eq!(list.len(), 1);
        let comment = &list.regions()[0];
        assert_eq!(comment.kind, RegionKind::Comment);
        assert_eq!((comment.start_line, comment.end_line), (0, 2));
    }
}
