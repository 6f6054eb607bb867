//! Collapsed labels, the text shown in place of a folded region.

use crate::outline::{Region, RegionKind, RegionList};

const MAX_LABEL_CHARS: usize = 100;

/// Label for `region`, read from the list's pinned snapshot.
///
/// - comments: the first line with content, skipping `<summary>` lines
/// - imports: the first line
/// - directives: the argument text, or the directive itself without one
/// - everything else: `...`
pub fn collapsed_text(list: &RegionList, region: &Region) -> String {
    let snapshot = list.snapshot();
    let start_line = || {
        snapshot
            .line_text(region.start_line)
            .map(str::trim)
            .unwrap_or_default()
    };

    match region.kind {
        RegionKind::Comment => {
            let label = (region.start_line..=region.end_line)
                .filter_map(|number| snapshot.line_text(number).ok())
                .map(str::trim)
                .find(|line| {
                    let content = comment_content(line);
                    !content.is_empty() && content != "<summary>"
                })
                .unwrap_or_else(start_line);
            truncate_label(label)
        }
        RegionKind::ImportRun => start_line().to_string(),
        RegionKind::PreprocessorConditional => {
            let line = start_line();
            match directive_argument(line) {
                "" => line.to_string(),
                argument => argument.to_string(),
            }
        }
        RegionKind::Block | RegionKind::SwitchCaseGroup => "...".to_string(),
    }
}

/// Comment line without its markers.
fn comment_content(line: &str) -> &str {
    line.trim_start_matches(['/', '*'])
        .trim_end_matches(['/', '*'])
        .trim()
}

/// `"#region Fields // note"` → `"Fields // note"`
fn directive_argument(line: &str) -> &str {
    let rest = line.trim_start_matches('#').trim_start();
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    rest[name_len..].trim()
}

fn truncate_label(label: &str) -> String {
    match label.char_indices().nth(MAX_LABEL_CHARS) {
        Some((at, _)) => format!("{} ...", &label[..at]),
        None => label.to_string(),
    }
}
