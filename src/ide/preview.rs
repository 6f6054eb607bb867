//! Hover previews: the text shown when hovering a collapsed region.
//!
//! A preview is built lazily from the live snapshot. When the document has
//! moved on since the region list was computed, the region's offsets no
//! longer describe the live text; [`preview_or_fallback`] then renders a
//! plain-text preview from the snapshot pinned in the region list instead.

use tracing::warn;

use crate::base::{TextRange, TextSize, TextSnapshot};
use crate::error::{OutlineError, Result};
use crate::outline::{Region, RegionList};

const DEBUG_HEADER: &str = "[debug] outline preview";
const DEBUG_EXTRA_LINES: usize = 3;
const TAB_WIDTH: usize = 4;

/// Preview limits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreviewOptions {
    /// Lines shown before the preview is cut with `...`
    pub max_lines: usize,
    /// Prepend a header and allow a few extra lines.
    pub debug: bool,
    /// Line limit of the plain-text fallback
    pub fallback_max_lines: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_lines: 40,
            debug: false,
            fallback_max_lines: 25,
        }
    }
}

impl PreviewOptions {
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_fallback_max_lines(mut self, lines: usize) -> Self {
        self.fallback_max_lines = lines;
        self
    }

    fn line_budget(&self) -> usize {
        if self.debug {
            self.max_lines + DEBUG_EXTRA_LINES
        } else {
            self.max_lines
        }
    }
}

/// Rendered hover text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverPreview {
    pub text: String,
    /// Content lines included, header and `...` excluded
    pub lines: usize,
    pub truncated: bool,
    /// Rendered from the pinned snapshot after the live preview failed
    pub fallback: bool,
}

/// Build the preview of `region` against the live `current` snapshot.
///
/// Fails with [`OutlineError::StaleSnapshot`] when `list` was computed
/// against a different version.
pub fn hover_preview(
    list: &RegionList,
    region: &Region,
    current: &TextSnapshot,
    options: &PreviewOptions,
) -> Result<HoverPreview> {
    if list.version() != current.version() {
        return Err(OutlineError::StaleSnapshot {
            region: list.version(),
            current: current.version(),
        });
    }

    let (first, begin) = preview_start(current, region)?;
    let mut lines = Vec::new();
    for number in first..=region.end_line {
        let line = current.line(number)?;
        let start = if number == first { begin } else { line.start() };
        let end = if number == region.end_line {
            region.range.end().clamp(start, line.end())
        } else {
            line.end()
        };
        lines.push(current.slice(TextRange::new(start, end))?);
    }
    let partial_first = begin > current.line(first)?.start();

    Ok(render(&lines, options.line_budget(), options.debug, partial_first, false))
}

/// [`hover_preview`], falling back to a plain-text rendering of the pinned
/// snapshot when the live preview cannot be built.
pub fn preview_or_fallback(
    list: &RegionList,
    region: &Region,
    current: &TextSnapshot,
    options: &PreviewOptions,
) -> HoverPreview {
    match hover_preview(list, region, current, options) {
        Ok(preview) => preview,
        Err(err) => {
            warn!(%err, start_line = region.start_line, "hover preview failed, using plain text");
            plain_text_preview(list.snapshot(), region, options)
        }
    }
}

/// Plain-text rendering of `region` from `snapshot`: tabs expanded, leading
/// blank lines dropped, at most `fallback_max_lines` lines.
pub fn plain_text_preview(
    snapshot: &TextSnapshot,
    region: &Region,
    options: &PreviewOptions,
) -> HoverPreview {
    let text = snapshot.slice(region.range).unwrap_or_default();
    let expanded: Vec<String> = text
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .map(|line| line.replace('\t', &" ".repeat(TAB_WIDTH)))
        .collect();
    let lines: Vec<&str> = expanded.iter().map(String::as_str).collect();
    render(&lines, options.fallback_max_lines, options.debug, false, true)
}

/// First line and offset of the preview.
///
/// A preview shows the region's own text: it begins at the region start, or
/// on the next line when the start sits at the end of a line (a block moved
/// up to its header, a case body after its label). When only indentation
/// precedes the start, the whole line is taken.
fn preview_start(snapshot: &TextSnapshot, region: &Region) -> Result<(u32, TextSize)> {
    let start = region.range.start();
    let line = snapshot.line(region.start_line)?;
    if start >= line.end() && region.start_line < region.end_line {
        let next = snapshot.line(region.start_line + 1)?;
        return Ok((next.number, next.start()));
    }
    if snapshot.only_whitespace_before(start) {
        Ok((line.number, line.start()))
    } else {
        Ok((line.number, start.max(line.start())))
    }
}

/// `partial_first`: the first line starts mid-line and keeps its text as is.
fn render(
    lines: &[&str],
    budget: usize,
    debug: bool,
    partial_first: bool,
    fallback: bool,
) -> HoverPreview {
    let truncated = lines.len() > budget;
    let shown = &lines[..lines.len().min(budget)];
    let skip = usize::from(partial_first && !shown.is_empty());
    let indent = min_indent(&shown[skip..]);

    let mut out: Vec<&str> = Vec::with_capacity(shown.len() + 3);
    if debug {
        out.push(DEBUG_HEADER);
        out.push("");
    }
    out.extend(shown[..skip].iter().copied());
    out.extend(shown[skip..].iter().map(|line| strip_indent(line, indent)));
    if truncated {
        out.push("...");
    }

    HoverPreview {
        text: out.join("\n"),
        lines: shown.len(),
        truncated,
        fallback,
    }
}

fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Smallest indent among non-blank lines.
fn min_indent(lines: &[&str]) -> usize {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0)
}

fn strip_indent(line: &str, indent: usize) -> &str {
    if line.trim().is_empty() {
        return "";
    }
    match line.char_indices().nth(indent) {
        Some((at, _)) => &line[at..],
        None => "",
    }
}
