//! Ranked free-text search over items.
//!
//! Matching is a case-insensitive substring test per field. Each occurrence
//! adds a fixed weight:
//!
//! | field    | weight |
//! |----------|--------|
//! | title    | 10 when the title equals the query, else 5 |
//! | tag      | 3 |
//! | property | 2 (value rendered as text) |
//! | content  | 1 (title text, counted again) |

mod scorer;
pub mod types;

pub use scorer::{CONTENT_WEIGHT, PROPERTY_WEIGHT, TAG_WEIGHT, TITLE_EXACT_WEIGHT, TITLE_WEIGHT};
pub use types::*;

use crate::types::Item;
use log::trace;

/// Rank `items` against `query`.
///
/// A blank query returns no results. The query is matched as given, untrimmed. Items scoring zero are dropped.
/// Results are ordered by descending score; ties keep input order.
pub fn search(query: &str, items: &[Item]) -> Vec<SearchResult> {
    let query = query.to_lowercase();
    if query.trim().is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = items
        .iter()
        .filter_map(|item| scorer::score_item(item, &query))
        .collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));

    trace!("search '{}': {} of {} items matched", query, results.len(), items.len());
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PropertyValue, TODO_KIND, Timestamp};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn item(id: &str, title: &str, tags: &[&str]) -> Item {
        Item::new(id, TODO_KIND, title, "f.md", now())
            .unwrap()
            .with_tags(tags.iter().copied())
    }

    #[test]
    fn test_empty_query() {
        let items = vec![item("1", "Buy milk", &[])];
        assert!(search("", &items).is_empty());
        assert!(search("   ", &items).is_empty());
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let items = vec![item("1", "milk", &[]), item("2", "milk shake", &[])];
        let results = search("milk ", &items);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].item.id, "2");
    }

    #[test]
    fn test_title_outranks_tag() {
        let items = vec![item("tag", "Errands", &["milk"]), item("title", "milk", &[])];
        let results = search("milk", &items);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].item.id, "title");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_exact_title_weight() {
        let exact = search("milk", &[item("1", "Milk", &[])]);
        assert_eq!(exact[0].score, TITLE_EXACT_WEIGHT + CONTENT_WEIGHT);

        let partial = search("milk", &[item("1", "Buy milk", &[])]);
        assert_eq!(partial[0].score, TITLE_WEIGHT + CONTENT_WEIGHT);
    }

    #[test]
    fn test_counts_every_occurrence() {
        let results = search("a", &[item("1", "a a", &["ab"])]);
        let expected = 2 * TITLE_WEIGHT + TAG_WEIGHT + 2 * CONTENT_WEIGHT;
        assert_eq!(results[0].score, expected);

        let fields: Vec<_> = results[0].matches.iter().map(|m| m.field.clone()).collect();
        assert_eq!(
            fields,
            vec![
                MatchField::Title,
                MatchField::Title,
                MatchField::Tag { tag: "ab".to_string() },
                MatchField::Content,
                MatchField::Content,
            ]
        );
        assert_eq!(results[0].matches[1].range, 2..3);
    }

    #[test]
    fn test_property_values_are_searched() {
        let book = Item::new("b", "book", "Dune", "dune.md", now())
            .unwrap()
            .with_property("author", PropertyValue::Text("Frank Herbert".to_string()))
            .with_property("year", PropertyValue::Number(1965.0));

        let results = search("herbert", std::slice::from_ref(&book));
        assert_eq!(results[0].score, PROPERTY_WEIGHT);
        assert_eq!(
            results[0].matches[0].field,
            MatchField::Property { key: "author".to_string() }
        );

        assert_eq!(search("1965", &[book])[0].score, PROPERTY_WEIGHT);
    }

    #[test]
    fn test_non_matching_items_dropped() {
        let items = vec![item("1", "Buy milk", &[]), item("2", "Walk dog", &[])];
        let results = search("DOG", &items);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].item.id, "2");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = vec![item("1", "milk one", &[]), item("2", "milk two", &[])];
        let results = search("milk", &items);
        let ids: Vec<_> = results.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
