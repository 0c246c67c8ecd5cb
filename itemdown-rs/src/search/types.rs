//! Result types for free-text search.

use crate::types::Item;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which part of an item a match was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum MatchField {
    Title,
    /// A tag; `tag` is the full tag path.
    Tag { tag: String },
    /// A property value; `key` names the property.
    Property { key: String },
    /// Looser body-text match over the title.
    Content,
}

/// A single occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub field: MatchField,
    /// Character (not byte) offsets into the lowercased field text.
    pub range: Range<usize>,
}

/// A scored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub item: Item,
    pub score: u32,
    /// One entry per occurrence, in field order.
    pub matches: Vec<Match>,
}
