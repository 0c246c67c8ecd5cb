//! Inline tag parsing (`#tag` and `#tag/subtag`).

use regex::Regex;
use std::sync::LazyLock;

// `#` followed by letters, digits, `_` or `/`. A `#` followed by a space
// (markdown heading) is not a tag.
pub(crate) static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([\p{L}\p{N}_/]+)").unwrap());

/// Normalise a raw tag path: strip a leading `#` and surrounding `/`.
pub(crate) fn normalize(raw: &str) -> Option<&str> {
    let tag = raw.trim().trim_start_matches('#').trim_matches('/');
    if tag.is_empty() { None } else { Some(tag) }
}

/// Every tag in `text`, without the leading `#`, de-duplicated in
/// first-seen order.
pub fn extract_tags(text: &str) -> Vec<String> {
    let tags: Vec<String> = TAG
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| normalize(m.as_str()))
        .map(str::to_string)
        .collect();
    crate::tags::unique_tags(&tags)
}
