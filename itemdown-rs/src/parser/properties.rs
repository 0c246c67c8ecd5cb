//! Free-form item properties from a note header.

use crate::parser::coerce::coerce;
use crate::parser::header::{parse_header, unquote};
use crate::types::PropertyValue;
use std::collections::BTreeMap;

/// Key naming the kind of a typed note.
pub const KIND_KEY: &str = "type";

/// Every top-level scalar except `type`, coerced to a typed value.
///
/// Never fails. Nested blocks, comments and lines outside the grammar are
/// skipped, as are keys with an empty value. Later duplicates win.
pub fn parse_item_properties(header: &str) -> BTreeMap<String, PropertyValue> {
    parse_header(header)
        .scalars()
        .filter(|(key, value)| *key != KIND_KEY && !value.is_empty())
        .map(|(key, value)| (key.to_string(), coerce(value)))
        .collect()
}

/// The `type` declared by a note header, if any.
pub fn parse_item_kind(header: &str) -> Option<String> {
    parse_header(header)
        .scalar(KIND_KEY)
        .map(|kind| unquote(kind).trim())
        .filter(|kind| !kind.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_item_properties() {
        let header = "type: book\n# rating out of five\nrating: 4.5\nauthor: \"Frank Herbert\"\nread: true\n\nfinished: 2024-01-20";
        let props = parse_item_properties(header);

        assert_eq!(props.len(), 4);
        assert!(!props.contains_key("type"));
        assert_eq!(props["rating"], PropertyValue::Number(4.5));
        assert_eq!(props["author"], PropertyValue::Text("Frank Herbert".to_string()));
        assert_eq!(props["read"], PropertyValue::Bool(true));
        assert_eq!(
            props["finished"],
            PropertyValue::Date(Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_quoted_values_stay_text() {
        let props = parse_item_properties("isbn: \"9780441013593\"");
        assert_eq!(
            props["isbn"],
            PropertyValue::Text("9780441013593".to_string())
        );
    }

    #[test]
    fn test_blocks_and_empty_values_skipped() {
        let props = parse_item_properties("aliases:\n  - Dune\nempty:\nkept: yes");
        assert_eq!(props.len(), 1);
        assert_eq!(props["kept"], PropertyValue::Text("yes".to_string()));
    }

    #[test]
    fn test_parse_item_kind() {
        assert_eq!(parse_item_kind("type: book"), Some("book".to_string()));
        assert_eq!(parse_item_kind("type: \"movie\""), Some("movie".to_string()));
        assert_eq!(parse_item_kind("type: \"\""), None);
        assert_eq!(parse_item_kind("title: x"), None);
    }

    #[test]
    fn test_compact_block_does_not_leak_keys() {
        let header = "type: book\naliases:\n- Dune\n  type: movie\nrating: 5";
        assert_eq!(parse_item_kind(header), Some("book".to_string()));

        let props = parse_item_properties(header);
        assert_eq!(props.len(), 1);
        assert_eq!(props["rating"], PropertyValue::Number(5.0));
    }
}
