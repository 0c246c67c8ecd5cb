//! Tag hierarchy operations over `/`-delimited tag paths.
//!
//! Tags are stored without the leading `#`: `work/backend/api` has the
//! ancestors `work`, `work/backend` and itself. Patterns may contain `*`,
//! which matches within a single level only, so `work/*` matches
//! `work/backend` but not `work/backend/api`.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Path separator between tag levels.
pub const SEPARATOR: char = '/';

const WILDCARD: char = '*';

/// A compiled tag pattern.
#[derive(Debug, Clone)]
pub enum TagPattern {
    Exact(String),
    Wildcard(Regex),
}

impl TagPattern {
    pub fn new(pattern: &str) -> Self {
        if !pattern.contains(WILDCARD) {
            return TagPattern::Exact(pattern.to_string());
        }

        let body = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("[^/]*");
        match Regex::new(&format!("^{}$", body)) {
            Ok(re) => TagPattern::Wildcard(re),
            // Escaped literals always compile; fall back to literal matching.
            Err(_) => TagPattern::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            TagPattern::Exact(exact) => exact == tag,
            TagPattern::Wildcard(re) => re.is_match(tag),
        }
    }
}

/// All members of `universe` matched by `pattern`.
///
/// Without a `*`, the result is `{pattern}` when the universe contains it
/// and empty otherwise.
pub fn expand_wildcard<'a, I>(pattern: &str, universe: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let compiled = TagPattern::new(pattern);
    universe
        .into_iter()
        .filter(|tag| compiled.matches(tag))
        .map(str::to_string)
        .collect()
}

/// Boolean form of [`expand_wildcard`] for a single tag.
pub fn matches(tag: &str, pattern: &str) -> bool {
    TagPattern::new(pattern).matches(tag)
}

/// Every member of `universe` strictly below `tag`.
pub fn descendants<'a, I>(tag: &str, universe: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = format!("{}{}", tag, SEPARATOR);
    universe
        .into_iter()
        .filter(|candidate| candidate.starts_with(&prefix))
        .map(str::to_string)
        .collect()
}

/// All prefixes of `tag`, root first, ending with `tag` itself.
pub fn ancestors(tag: &str) -> Vec<String> {
    tag.match_indices(SEPARATOR)
        .map(|(idx, _)| tag[..idx].to_string())
        .chain(std::iter::once(tag.to_string()))
        .collect()
}

/// The tag one level up, if any.
pub fn parent(tag: &str) -> Option<&str> {
    tag.rfind(SEPARATOR).map(|idx| &tag[..idx])
}

/// The first level of `tag`.
pub fn root(tag: &str) -> &str {
    tag.split(SEPARATOR).next().unwrap_or(tag)
}

/// Tags with duplicates removed, preserving first occurrence order.
pub fn unique_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Group tags by their root level.
pub fn group_by_root(tags: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for tag in unique_tags(tags) {
        groups.entry(root(&tag).to_string()).or_default().push(tag);
    }
    groups
}
