//! The region tree built during one parse.

use std::fmt;
use std::ops::{Index, IndexMut};

use smol_str::SmolStr;

use crate::base::TextSize;

/// Kind of a foldable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionKind {
    /// `{ ... }`
    Block,
    /// A run of adjacent comment tokens
    Comment,
    /// `#if`/`#elif`/`#else`/`#endif` arms and `#region` pairs
    PreprocessorConditional,
    /// Consecutive import lines
    ImportRun,
    /// The body of one `case`/`default` label
    SwitchCaseGroup,
}

/// Index of a node in a [`RegionTree`].
///
/// Ids are assigned in discovery order and are only meaningful for the tree
/// that produced them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RegionId(u32);

impl RegionId {
    /// The synthetic root of every tree.
    pub const ROOT: RegionId = RegionId(0);

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionId({})", self.0)
    }
}

/// A region while it is being matched.
#[derive(Debug, Clone)]
pub struct RegionNode {
    /// `None` only for the root
    pub kind: Option<RegionKind>,
    pub start: TextSize,
    /// Meaningless until `complete` (comment and import runs track their
    /// running end here)
    pub end: TextSize,
    pub complete: bool,
    pub starts_from_prior_line: bool,
    /// Text of the opening token; the bare directive name for directives
    pub opener: SmolStr,
    pub parent: Option<RegionId>,
    pub children: Vec<RegionId>,
}

/// Arena holding the region tree of one parse.
#[derive(Debug, Clone)]
pub struct RegionTree {
    nodes: Vec<RegionNode>,
}

impl Default for RegionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTree {
    /// A tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![RegionNode {
                kind: None,
                start: TextSize::from(0),
                end: TextSize::from(0),
                complete: false,
                starts_from_prior_line: false,
                opener: SmolStr::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Create a region under `parent` and append it to the parent's children.
    pub fn open(
        &mut self,
        parent: RegionId,
        kind: RegionKind,
        start: TextSize,
        opener: impl Into<SmolStr>,
    ) -> RegionId {
        let id = RegionId(self.nodes.len() as u32);
        self.nodes.push(RegionNode {
            kind: Some(kind),
            start,
            end: start,
            complete: false,
            starts_from_prior_line: false,
            opener: opener.into(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self[parent].children.push(id);
        id
    }

    /// Mark a region complete. An end before the start collapses the region
    /// onto its start.
    pub fn close(&mut self, id: RegionId, end: TextSize) {
        let node = &mut self[id];
        node.end = end.max(node.start);
        node.complete = true;
    }

    pub fn kind(&self, id: RegionId) -> Option<RegionKind> {
        self[id].kind
    }

    pub fn is_complete(&self, id: RegionId) -> bool {
        self[id].complete
    }

    pub fn children(&self, id: RegionId) -> &[RegionId] {
        &self[id].children
    }

    /// `id` followed by its ancestors up to and including the root.
    pub fn ancestors(&self, id: RegionId) -> impl Iterator<Item = RegionId> + '_ {
        std::iter::successors(Some(id), move |&current| self[current].parent)
    }

    /// Nearest open region, starting at `from` and walking up, that
    /// satisfies `pred`.
    pub fn nearest_open(
        &self,
        from: RegionId,
        mut pred: impl FnMut(&RegionNode) -> bool,
    ) -> Option<RegionId> {
        self.ancestors(from).find(|&id| {
            let node = &self[id];
            node.kind.is_some() && !node.complete && pred(node)
        })
    }

    /// Number of regions, root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<RegionId> for RegionTree {
    type Output = RegionNode;

    fn index(&self, id: RegionId) -> &RegionNode {
        &self.nodes[id.0 as usize]
    }
}

impl IndexMut<RegionId> for RegionTree {
    fn index_mut(&mut self, id: RegionId) -> &mut RegionNode {
        &mut self.nodes[id.0 as usize]
    }
}
