//! Filter evaluation against item collections.
//!
//! Axes combine with AND. Within the tag axis, requested patterns are first
//! expanded against every tag in the collection and an item matches when it
//! carries at least one expanded tag. Absent or empty axes impose no
//! constraint.

use crate::tags::expand_wildcard;
use crate::types::{Item, ViewFilters};
use std::collections::HashSet;

/// A [`ViewFilters`] prepared for evaluation against one collection.
#[derive(Debug, Clone)]
pub struct FilterEvaluator<'a> {
    filters: &'a ViewFilters,
    /// Expanded tag set; `None` when the tag axis is unconstrained.
    tags: Option<HashSet<String>>,
}

impl<'a> FilterEvaluator<'a> {
    /// Prepare `filters`, expanding tag wildcards over the tags of `items`.
    pub fn new(filters: &'a ViewFilters, items: &[Item]) -> Self {
        let tags = non_empty(&filters.tags).map(|patterns| {
            let universe: HashSet<&str> = items
                .iter()
                .flat_map(|item| item.tags.iter().map(String::as_str))
                .collect();
            patterns
                .iter()
                .flat_map(|pattern| expand_wildcard(pattern, universe.iter().copied()))
                .collect()
        });

        Self { filters, tags }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matches_tags(item)
            && self.matches_kind(item)
            && self.matches_completed(item)
            && self.matches_folder(item)
            && self.matches_due(item)
    }

    fn matches_tags(&self, item: &Item) -> bool {
        self.tags
            .as_ref()
            .is_none_or(|set| item.tags.iter().any(|tag| set.contains(tag)))
    }

    fn matches_kind(&self, item: &Item) -> bool {
        non_empty(&self.filters.item_types).is_none_or(|kinds| kinds.contains(&item.kind))
    }

    fn matches_completed(&self, item: &Item) -> bool {
        self.filters
            .completed
            .is_none_or(|completed| item.completed == completed)
    }

    fn matches_folder(&self, item: &Item) -> bool {
        non_empty(&self.filters.folders).is_none_or(|folders| {
            folders
                .iter()
                .any(|folder| in_folder(&item.source_location, folder))
        })
    }

    fn matches_due(&self, item: &Item) -> bool {
        let (before, after) = (self.filters.due_before, self.filters.due_after);
        if before.is_none() && after.is_none() {
            return true;
        }
        let Some(due) = item.due_date() else {
            return false;
        };
        before.is_none_or(|b| due < b) && after.is_none_or(|a| due > a)
    }
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&Vec<String>> {
    list.as_ref().filter(|l| !l.is_empty())
}

/// True when `source_location` lies under `folder`.
///
/// The folder matches as a whole path or as a run of whole path segments,
/// so `projects` matches `projects/a.md` and `work/projects/b.md` but not
/// `side-projects/c.md`. Backslashes count as separators.
pub fn in_folder(source_location: &str, folder: &str) -> bool {
    let source = source_location.replace('\\', "/");
    let folder = folder.replace('\\', "/");
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        return true;
    }

    source == folder
        || source.starts_with(&format!("{}/", folder))
        || source.contains(&format!("/{}/", folder))
}

/// Items matching `filters`, in input order.
pub fn apply_filters(filters: &ViewFilters, items: &[Item]) -> Vec<Item> {
    let evaluator = FilterEvaluator::new(filters, items);
    items
        .iter()
        .filter(|item| evaluator.matches(item))
        .cloned()
        .collect()
}
