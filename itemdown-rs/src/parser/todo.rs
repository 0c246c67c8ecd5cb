//! Checkbox todo extraction with inline emoji metadata.
//!
//! The body is scanned line by line with a three-state machine:
//!
//! - `Scanning`: looking for a checkbox line or a code fence.
//! - `InCodeFence`: every line is inert until the closing fence.
//! - `Accumulating`: a checkbox line was seen; following non-blank lines
//!   are continuation text.
//!
//! Leaving `Accumulating` for any reason goes through a single flush path.

use crate::parser::date::parse_iso_date;
use crate::parser::tag::{TAG, extract_tags};
use crate::types::{
    DUE_DATE_PROPERTY, Item, PRIORITY_PROPERTY, Priority, PropertyValue, TODO_KIND, Timestamp,
};
use chrono::NaiveTime;
use log::trace;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Matches: optional indent, `-` or `*`, whitespace, `[c]`, then the rest.
static CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+\[(.)\](.*)$").unwrap());

static DUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"📅 ?(\d{4}-\d{2}-\d{2})(?:T(\d{2}:\d{2}))?").unwrap()
});

const CODE_FENCE: &str = "```";

/// Priority markers in precedence order.
const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

#[derive(Debug)]
struct PendingTodo {
    line: usize,
    completed: bool,
    text: String,
}

#[derive(Debug)]
enum State {
    Scanning,
    InCodeFence,
    Accumulating(PendingTodo),
}

struct Extractor<'a> {
    source_location: &'a str,
    now: Timestamp,
    items: Vec<Item>,
}

impl Extractor<'_> {
    fn step(&mut self, state: State, line: &str, line_num: usize) -> State {
        let trimmed = line.trim();

        if trimmed.starts_with(CODE_FENCE) {
            return match state {
                State::InCodeFence => State::Scanning,
                State::Accumulating(pending) => {
                    self.flush(pending);
                    State::InCodeFence
                }
                State::Scanning => State::InCodeFence,
            };
        }

        if matches!(state, State::InCodeFence) {
            return state;
        }

        if let Some(caps) = CHECKBOX.captures(line) {
            if let State::Accumulating(pending) = state {
                self.flush(pending);
            }
            let marker = caps.get(1).map_or("", |m| m.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());
            return State::Accumulating(PendingTodo {
                line: line_num,
                completed: marker.eq_ignore_ascii_case("x"),
                text: text.to_string(),
            });
        }

        match state {
            State::Accumulating(pending) if trimmed.is_empty() => {
                self.flush(pending);
                State::Scanning
            }
            State::Accumulating(mut pending) => {
                pending.text.push('\n');
                pending.text.push_str(line);
                State::Accumulating(pending)
            }
            other => other,
        }
    }

    fn flush(&mut self, pending: PendingTodo) {
        match build_todo(&pending, self.source_location, self.now) {
            Some(item) => self.items.push(item),
            None => trace!(
                "{}:{}: dropping todo with empty title",
                self.source_location, pending.line
            ),
        }
    }
}

/// Extract every todo from a document body.
pub fn extract_todos(body: &str, source_location: &str, now: Timestamp) -> Vec<Item> {
    extract_todos_from_line(body, source_location, 1, now)
}

/// Like [`extract_todos`] for a body that starts at `first_line` of its
/// document, so identifiers stay anchored to document line numbers.
pub fn extract_todos_from_line(
    body: &str,
    source_location: &str,
    first_line: usize,
    now: Timestamp,
) -> Vec<Item> {
    let mut extractor = Extractor {
        source_location,
        now,
        items: Vec::new(),
    };

    let mut state = State::Scanning;
    for (idx, line) in body.lines().enumerate() {
        state = extractor.step(state, line, first_line + idx);
    }
    if let State::Accumulating(pending) = state {
        extractor.flush(pending);
    }

    extractor.items
}

fn build_todo(pending: &PendingTodo, source_location: &str, now: Timestamp) -> Option<Item> {
    let text = pending.text.as_str();
    let due = find_due_date(text);
    let title = clean_title(text, due.as_ref().map(|(span, _)| span.clone()));

    let mut item = Item::new(
        Item::derive_id(source_location, Some(pending.line)),
        TODO_KIND,
        &title,
        source_location,
        now,
    )?
    .with_tags(extract_tags(text));

    item.completed = pending.completed;

    if let Some((_, due)) = due {
        item = item.with_property(DUE_DATE_PROPERTY, PropertyValue::Date(due));
    }
    if let Some(priority) = extract_priority(text) {
        item = item.with_property(PRIORITY_PROPERTY, PropertyValue::Text(priority.to_string()));
    }

    Some(item)
}

/// Due date from the first `📅` date token, with the token's byte span.
///
/// An invalid calendar date yields `None` and the token stays in the title.
/// An invalid time falls back to the date alone.
fn find_due_date(text: &str) -> Option<(Range<usize>, Timestamp)> {
    let caps = DUE.captures(text)?;
    let span = caps.get(0)?.range();
    let date = parse_iso_date(caps.get(1)?.as_str())?;

    let time = caps
        .get(2)
        .and_then(|t| NaiveTime::parse_from_str(t.as_str(), "%H:%M").ok());
    let due = match time {
        Some(time) => date.date_naive().and_time(time).and_utc(),
        None => date,
    };
    Some((span, due))
}

fn extract_priority(text: &str) -> Option<Priority> {
    PRIORITIES.into_iter().find(|p| text.contains(p.emoji()))
}

/// Remove metadata tokens, each with the blanks before it, then trim every line.
fn clean_title(text: &str, due: Option<Range<usize>>) -> String {
    let mut spans: Vec<Range<usize>> = due.into_iter().collect();
    spans.extend(TAG.find_iter(text).map(|m| m.range()));
    for priority in PRIORITIES {
        let emoji = priority.emoji();
        spans.extend(text.match_indices(emoji).map(|(i, _)| i..i + emoji.len()));
    }
    spans.sort_by_key(|span| span.start);

    let mut title = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if span.end <= cursor {
            continue;
        }
        let start = span.start.max(cursor);
        title.push_str(text[cursor..start].trim_end_matches([' ', '\t']));
        cursor = span.end;
    }
    title.push_str(&text[cursor..]);

    title
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn todos(body: &str) -> Vec<Item> {
        extract_todos(body, "f.md", now())
    }

    #[test]
    fn test_todo_with_all_metadata() {
        let items = todos("- [ ] Buy milk #home 📅 2024-03-15 ⏫");
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.title, "Buy milk");
        assert_eq!(item.kind, TODO_KIND);
        assert_eq!(item.tags, vec!["home"]);
        assert_eq!(item.priority(), Some(Priority::High));
        assert_eq!(
            item.due_date(),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
        assert!(!item.completed);
        assert_eq!(item.source_location, "f.md");
        assert_eq!(item.created_at, now());
    }

    #[test]
    fn test_completed_marker() {
        assert!(todos("- [x] Done")[0].completed);
        assert!(todos("- [X] Done")[0].completed);
        assert!(!todos("- [/] Started")[0].completed);
        assert!(!todos("- [ ] Open")[0].completed);
    }

    #[test]
    fn test_empty_title_is_dropped() {
        assert!(todos("- [ ]").is_empty());
        assert!(todos("- [ ] #tag ⏫ 📅 2024-03-15").is_empty());
    }

    #[test]
    fn test_star_bullets_and_indent() {
        let items = todos("  * [ ] Nested\n\t- [x] Tabbed");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Nested");
        assert_eq!(items[1].title, "Tabbed");
    }

    #[test]
    fn test_non_checkbox_lines_ignored() {
        assert!(todos("- plain bullet\n[ ] no bullet\n-[ ] no space").is_empty());
    }

    #[test]
    fn test_code_fence_is_inert() {
        let body = "- [ ] Real\n```\n- [ ] Fake\n```\n- [ ] Also real";
        let items = todos(body);
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Real", "Also real"]);
    }

    #[test]
    fn test_unterminated_fence_swallows_rest() {
        let items = todos("```rust\n- [ ] Fake");
        assert!(items.is_empty());
    }

    #[test]
    fn test_multiline_todo() {
        let items = todos("- [ ] First line\n  second   line #later\n- [ ] Next");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First line\nsecond   line");
        assert_eq!(items[0].tags, vec!["later"]);
        assert_eq!(items[1].title, "Next");
    }

    #[test]
    fn test_blank_line_ends_accumulation() {
        let items = todos("- [ ] Task\n\nParagraph after");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Task");
    }

    #[test]
    fn test_first_due_date_wins() {
        let items = todos("- [ ] Pay 📅 2024-04-01 📅 2024-05-01");
        assert_eq!(
            items[0].due_date(),
            Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(items[0].title, "Pay 📅 2024-05-01");

        let items = todos("- [ ] Pay 📅 soon 📅 2024-05-01");
        assert_eq!(
            items[0].due_date(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(items[0].title, "Pay 📅 soon");
    }

    #[test]
    fn test_due_date_with_time() {
        let items = todos("- [ ] Call 📅2024-04-01T14:30");
        assert_eq!(
            items[0].due_date(),
            Some(Utc.with_ymd_and_hms(2024, 4, 1, 14, 30, 0).unwrap())
        );
        assert_eq!(items[0].title, "Call");
    }

    #[test]
    fn test_invalid_due_date_is_absent() {
        let items = todos("- [ ] Pay 📅 2024-13-45");
        assert_eq!(items[0].due_date(), None);
        assert_eq!(items[0].title, "Pay 📅 2024-13-45");

        let items = todos("- [ ] Pay 📅 soon");
        assert_eq!(items[0].due_date(), None);
        assert_eq!(items[0].title, "Pay 📅 soon");
    }

    #[test]
    fn test_invalid_time_keeps_the_date() {
        let items = todos("- [ ] Call 📅 2024-04-01T25:99");
        assert_eq!(
            items[0].due_date(),
            Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(items[0].title, "Call");
    }

    #[test]
    fn test_title_keeps_inner_spacing() {
        assert_eq!(todos("- [ ] a    b")[0].title, "a    b");
        assert_eq!(todos("- [ ] #x Buy  #y milk ⏫")[0].title, "Buy milk");
    }

    #[test]
    fn test_priority_precedence() {
        assert_eq!(todos("- [ ] a 🔽 ⏫")[0].priority(), Some(Priority::High));
        assert_eq!(todos("- [ ] a 🔽 🔼")[0].priority(), Some(Priority::Medium));
        assert_eq!(todos("- [ ] a 🔽")[0].priority(), Some(Priority::Low));
        assert_eq!(todos("- [ ] a")[0].priority(), None);
        assert_eq!(todos("- [ ] a 🔽 ⏫")[0].title, "a");
    }

    #[test]
    fn test_ids_are_stable_and_distinct() {
        let body = "- [ ] One\n- [ ] Two";
        let first = todos(body);
        let second = todos(body);
        assert_eq!(first[0].id, second[0].id);
        assert_ne!(first[0].id, first[1].id);
    }

    #[test]
    fn test_ids_follow_document_lines() {
        let from_body = extract_todos_from_line("- [ ] One", "f.md", 4, now());
        assert_eq!(from_body[0].id, Item::derive_id("f.md", Some(4)));
    }
}
