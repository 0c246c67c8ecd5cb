//! Per-item scoring.

use super::types::{Match, MatchField, SearchResult};
use crate::types::Item;
use std::ops::Range;

/// Per-occurrence weight of a title hit when the title equals the query.
pub const TITLE_EXACT_WEIGHT: u32 = 10;
/// Per-occurrence weight of a title hit otherwise.
pub const TITLE_WEIGHT: u32 = 5;
pub const TAG_WEIGHT: u32 = 3;
pub const PROPERTY_WEIGHT: u32 = 2;
pub const CONTENT_WEIGHT: u32 = 1;

/// Non-overlapping occurrences of `needle` in `haystack`, as char ranges.
///
/// Both arguments are expected to be lowercased already.
pub(crate) fn occurrences(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    if needle.is_empty() {
        return Vec::new();
    }
    let needle_chars = needle.chars().count();
    let mut ranges = Vec::new();
    let mut chars_before = 0;
    let mut last_byte = 0;

    for (byte_idx, _) in haystack.match_indices(needle) {
        chars_before += haystack[last_byte..byte_idx].chars().count();
        ranges.push(chars_before..chars_before + needle_chars);
        chars_before += needle_chars;
        last_byte = byte_idx + needle.len();
    }
    ranges
}

struct Scorer {
    score: u32,
    matches: Vec<Match>,
}

impl Scorer {
    fn record(&mut self, ranges: &[Range<usize>], weight: u32, field: impl Fn() -> MatchField) {
        let count = u32::try_from(ranges.len()).unwrap_or(u32::MAX);
        self.score = self.score.saturating_add(count.saturating_mul(weight));
        self.matches.extend(ranges.iter().map(|range| Match {
            field: field(),
            range: range.clone(),
        }));
    }
}

/// Score one item against a lowercased, non-empty query.
///
/// Returns `None` when nothing matches.
pub(crate) fn score_item(item: &Item, query: &str) -> Option<SearchResult> {
    let mut scorer = Scorer {
        score: 0,
        matches: Vec::new(),
    };

    let title = item.title.to_lowercase();
    let title_hits = occurrences(&title, query);
    let title_weight = if title == query {
        TITLE_EXACT_WEIGHT
    } else {
        TITLE_WEIGHT
    };
    scorer.record(&title_hits, title_weight, || MatchField::Title);

    for tag in &item.tags {
        let hits = occurrences(&tag.to_lowercase(), query);
        scorer.record(&hits, TAG_WEIGHT, || MatchField::Tag { tag: tag.clone() });
    }

    for (key, value) in &item.properties {
        let hits = occurrences(&value.to_string().to_lowercase(), query);
        scorer.record(&hits, PROPERTY_WEIGHT, || MatchField::Property { key: key.clone() });
    }

    scorer.record(&title_hits, CONTENT_WEIGHT, || MatchField::Content);

    if scorer.score == 0 {
        return None;
    }
    Some(SearchResult {
        item: item.clone(),
        score: scorer.score,
        matches: scorer.matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrences_are_char_ranges() {
        assert_eq!(occurrences("milk and milk", "milk"), vec![0..4, 9..13]);
        assert_eq!(occurrences("café milk", "milk"), vec![5..9]);
        assert_eq!(occurrences("aaaa", "aa"), vec![0..2, 2..4]);
        assert!(occurrences("milk", "").is_empty());
    }
}
