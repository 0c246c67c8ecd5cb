//! Tag listing command.

use crate::cli::args::TagsArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::tags::{ancestors, expand_wildcard, group_by_root, parent};
use crate::vault::Vault;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Output for a flat tag listing.
#[derive(Debug, Serialize)]
pub struct TagsOutput {
    pub tags: Vec<TagOutput>,
}

/// A tag with count.
#[derive(Debug, Serialize)]
pub struct TagOutput {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// Output for nested tags hierarchy.
#[derive(Debug, Serialize)]
pub struct NestedTagsOutput {
    pub tags: Vec<NestedTag>,
}

/// A tag in nested hierarchy format.
#[derive(Debug, Serialize)]
pub struct NestedTag {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NestedTag>,
}

/// Number of items carrying each tag.
pub fn tag_counts(vault: &Vault) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tag in vault.items().iter().flat_map(|item| &item.tags) {
        *counts.entry(tag.clone()).or_insert(0) += 1;
    }
    counts
}

/// List tags, optionally narrowed by a wildcard pattern.
pub fn run(vault: &Vault, args: &TagsArgs, output: &Output) -> Result<ExitCode> {
    let mut counts = tag_counts(vault);
    if let Some(pattern) = &args.pattern {
        let selected = expand_wildcard(pattern, counts.keys().map(String::as_str));
        counts.retain(|tag, _| selected.contains(tag));
    }

    if args.nested {
        let result = NestedTagsOutput {
            tags: build_nested_tags(&counts, args.with_counts),
        };
        output.print(&result)?;
    } else {
        let tags = counts
            .into_iter()
            .map(|(tag, count)| TagOutput {
                tag,
                count: args.with_counts.then_some(count),
            })
            .collect();
        output.print(&TagsOutput { tags })?;
    }

    Ok(ExitCode::Success)
}

/// Build a tag tree. Intermediate levels that no item carries directly
/// still appear, without a count.
pub fn build_nested_tags(counts: &BTreeMap<String, usize>, with_counts: bool) -> Vec<NestedTag> {
    let all: BTreeSet<String> = counts.keys().flat_map(|tag| ancestors(tag)).collect();
    let all: Vec<String> = all.into_iter().collect();

    group_by_root(&all)
        .into_keys()
        .map(|root| build_node(&root, &all, counts, with_counts))
        .collect()
}

fn build_node(
    tag: &str,
    all: &[String],
    counts: &BTreeMap<String, usize>,
    with_counts: bool,
) -> NestedTag {
    let children = all
        .iter()
        .filter(|candidate| parent(candidate) == Some(tag))
        .map(|child| build_node(child, all, counts, with_counts))
        .collect();

    NestedTag {
        tag: tag.to_string(),
        count: if with_counts { counts.get(tag).copied() } else { None },
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(tags: &[(&str, usize)]) -> BTreeMap<String, usize> {
        tags.iter().map(|(t, c)| (t.to_string(), *c)).collect()
    }

    #[test]
    fn test_build_nested_tags() {
        let nested = build_nested_tags(&counts(&[("work/a/x", 1), ("work/b", 2), ("home", 3)]), true);

        let roots: Vec<_> = nested.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(roots, vec!["home", "work"]);
        assert_eq!(nested[0].count, Some(3));

        let work = &nested[1];
        assert_eq!(work.count, None);
        let children: Vec<_> = work.children.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(children, vec!["work/a", "work/b"]);
        assert_eq!(work.children[0].children[0].tag, "work/a/x");
        assert_eq!(work.children[1].count, Some(2));
    }

    #[test]
    fn test_nested_without_counts() {
        let nested = build_nested_tags(&counts(&[("home", 3)]), false);
        assert_eq!(nested[0].count, None);
        assert!(nested[0].children.is_empty());
    }
}
