//! Saved view definitions: reading and writing the header grammar.

use crate::error::ParseError;
use crate::parser::date::{format_timestamp, resolve_date};
use crate::parser::header::{
    format_inline_array, parse_bool, parse_header, parse_list_value, quote_scalar, unquote,
};
use crate::parser::list_type::{NAME_KEY, required_name};
use crate::types::{DisplayStyle, SavedView, Timestamp, ViewFilters};
use log::debug;

const DISPLAY_STYLE_KEY: &str = "display_style";
const FILTERS_KEY: &str = "filters";

/// Parse a saved view from header text.
///
/// `now` anchors relative `due_before`/`due_after` tokens such as `+7d`.
/// Unknown filter keys are ignored.
pub fn parse_saved_view(header: &str, now: Timestamp) -> Result<SavedView, ParseError> {
    let parsed = parse_header(header);
    let name = required_name(&parsed)?;

    let display_style = match parsed.scalar(DISPLAY_STYLE_KEY) {
        None => DisplayStyle::default(),
        Some(raw) => unquote(raw)
            .trim()
            .parse::<DisplayStyle>()
            .map_err(|_| ParseError::invalid(DISPLAY_STYLE_KEY, "list or card", raw))?,
    };

    let mut filters = ViewFilters::default();
    if let Some(block) = parsed.block(FILTERS_KEY) {
        for (key, value) in block.entries.iter().flat_map(|e| e.fields.iter().copied()) {
            apply_filter(&mut filters, key, value, now, &name);
        }
    }

    Ok(SavedView {
        name,
        display_style,
        filters,
    })
}

fn apply_filter(filters: &mut ViewFilters, key: &str, value: &str, now: Timestamp, view: &str) {
    match key {
        "tags" => filters.tags = parse_list_value(value),
        "item_types" => filters.item_types = parse_list_value(value),
        "folders" => filters.folders = parse_list_value(value),
        "completed" => filters.completed = parse_bool(value),
        "due_before" => filters.due_before = resolve_date(unquote(value), now),
        "due_after" => filters.due_after = resolve_date(unquote(value), now),
        other => debug!("view '{}': ignoring unknown filter '{}'", view, other),
    }
}

/// Render a saved view as header text (without delimiters).
///
/// Dates are written in absolute form, so relative tokens are frozen at the
/// time the view was parsed.
pub fn format_saved_view(view: &SavedView) -> String {
    let mut out = format!("{}: {}\n", NAME_KEY, quote_scalar(&view.name));
    out.push_str(&format!("{}: {}\n", DISPLAY_STYLE_KEY, view.display_style));

    let filters = &view.filters;
    let mut lines = Vec::new();

    let lists = [
        ("tags", &filters.tags),
        ("item_types", &filters.item_types),
        ("folders", &filters.folders),
    ];
    for (key, list) in lists {
        if let Some(list) = list.as_ref().filter(|l| !l.is_empty()) {
            lines.push(format!("  {}: {}", key, format_inline_array(list)));
        }
    }
    if let Some(completed) = filters.completed {
        lines.push(format!("  completed: {}", completed));
    }
    if let Some(due) = filters.due_before {
        lines.push(format!("  due_before: {}", format_timestamp(due)));
    }
    if let Some(due) = filters.due_after {
        lines.push(format!("  due_after: {}", format_timestamp(due)));
    }

    if !lines.is_empty() {
        out.push_str(FILTERS_KEY);
        out.push_str(":\n");
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}
