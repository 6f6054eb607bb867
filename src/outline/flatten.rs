//! Tree → flat region list.

use super::region::{Region, RegionList};
use super::tree::{RegionId, RegionTree};
use crate::base::{SessionId, TextRange, TextSnapshot};

/// Flatten `tree` in pre-order, keeping complete regions that span more than
/// one line. Children of dropped regions are still visited.
pub fn flatten(tree: &RegionTree, snapshot: &TextSnapshot, session: SessionId) -> RegionList {
    let mut regions = Vec::with_capacity(tree.len());
    // (node, depth among surfaced regions)
    let mut stack: Vec<(RegionId, u32)> = tree
        .children(RegionId::ROOT)
        .iter()
        .rev()
        .map(|&id| (id, 0))
        .collect();

    while let Some((id, depth)) = stack.pop() {
        let node = &tree[id];
        let mut child_depth = depth;

        if let Some(kind) = node.kind {
            let start_line = snapshot.line_number(node.start);
            let end_line = snapshot.line_number(node.end);
            if node.complete && start_line != end_line {
                regions.push(Region {
                    kind,
                    range: TextRange::new(node.start, node.end),
                    start_line,
                    end_line,
                    depth,
                    starts_from_prior_line: node.starts_from_prior_line,
                });
                child_depth += 1;
            }
        }

        stack.extend(node.children.iter().rev().map(|&child| (child, child_depth)));
    }

    RegionList::new(session, snapshot.clone(), regions)
}
