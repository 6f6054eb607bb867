//! Change detection between two region lists.

use super::edit::{TextEdit, translate_through};
use super::region::RegionList;
use crate::base::TextRange;

/// Sorted, deduplicated region ranges.
fn normalize(ranges: impl Iterator<Item = TextRange>) -> Vec<TextRange> {
    let mut ranges: Vec<_> = ranges.collect();
    ranges.sort_by_key(|range| (range.start(), range.end()));
    ranges.dedup();
    ranges
}

/// Bounding range of everything present in exactly one of two sorted sets.
fn symmetric_cover(old: &[TextRange], new: &[TextRange]) -> Option<TextRange> {
    let key = |range: &TextRange| (range.start(), range.end());
    let mut cover: Option<TextRange> = None;
    let mut add = |range: TextRange| {
        cover = Some(cover.map_or(range, |c| c.cover(range)));
    };

    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        match key(&old[i]).cmp(&key(&new[j])) {
            std::cmp::Ordering::Less => {
                add(old[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                add(new[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    old[i..].iter().chain(&new[j..]).for_each(|&range| add(range));
    cover
}

/// Range of text whose outlining changed between `old` and `new`.
///
/// `edits` are the edits applied to the text since `old` was computed; old
/// ranges are moved through them before comparing. `None` means nothing
/// changed.
pub fn diff(old: &RegionList, new: &RegionList, edits: &[TextEdit]) -> Option<TextRange> {
    let old = normalize(old.iter().map(|region| translate_through(region.range, edits)));
    let new = normalize(new.iter().map(|region| region.range));
    symmetric_cover(&old, &new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn test_identical_sets_have_no_change() {
        let set = [range(0, 10), range(2, 5)];
        assert_eq!(symmetric_cover(&set, &set), None);
        assert_eq!(symmetric_cover(&[], &[]), None);
    }

    #[test]
    fn test_cover_spans_added_and_removed() {
        let old = [range(0, 10), range(20, 30)];
        let new = [range(0, 10), range(12, 15), range(40, 50)];
        assert_eq!(symmetric_cover(&old, &new), Some(range(12, 50)));
    }

    #[test]
    fn test_nested_addition_is_detected() {
        let old = [range(0, 100)];
        let new = [range(0, 100), range(10, 20)];
        assert_eq!(symmetric_cover(&old, &new), Some(range(10, 20)));
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let ranges = normalize([range(5, 9), range(0, 3), range(5, 9)].into_iter());
        assert_eq!(ranges, [range(0, 3), range(5, 9)]);
    }
}
