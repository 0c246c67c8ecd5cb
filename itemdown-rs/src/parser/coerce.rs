//! Classification of raw scalar strings into typed property values.

use crate::parser::date::parse_iso_date;
use crate::parser::header::{parse_number, unquote};
use crate::types::PropertyValue;

/// Classify a raw scalar.
///
/// Precedence is number, then boolean, then calendar date, then text with
/// one pair of surrounding quotes removed. A quoted `"42"` therefore stays
/// text.
pub fn coerce(raw: &str) -> PropertyValue {
    let trimmed = raw.trim();

    if let Some(number) = parse_number(trimmed) {
        return PropertyValue::Number(number);
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return PropertyValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return PropertyValue::Bool(false);
    }
    if let Some(date) = parse_iso_date(trimmed) {
        return PropertyValue::Date(date);
    }
    PropertyValue::Text(unquote(trimmed).to_string())
}
