//! Region presentation: what an editor shows for each region.
//!
//! Pure functions over a [`RegionList`](crate::outline::RegionList): labels
//! for folded regions, hover previews, and protocol-style folding ranges.
//! Nothing here mutates outlining state.

mod collapsed;
mod folding;
mod preview;

pub use collapsed::collapsed_text;
pub use folding::{FoldingKind, FoldingRange, folding_ranges};
pub use preview::{
    HoverPreview, PreviewOptions, hover_preview, plain_text_preview, preview_or_fallback,
};
