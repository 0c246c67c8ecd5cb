//! Line grammar for the restricted header subset.
//!
//! A header is read in one pass. Each line is classified on its own, then a
//! small builder groups the lines into top-level scalars and nested blocks:
//!
//! ```text
//! name: Books                 scalar
//! tags: [reading, "to do"]    scalar holding an inline array
//! fields:                     block anchor
//!   - name: title             block entry
//!     type: text              sibling field of the entry
//! ```
//!
//! Block entries may also sit at the anchor's own indentation (compact style).
//!
//! Lines the grammar does not recognise are ignored.

/// A single classified header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderLine<'a> {
    Blank,
    Comment,
    /// `key: value`; `value` is empty for a bare `key:`.
    Entry {
        indent: usize,
        key: &'a str,
        value: &'a str,
    },
    /// `- key: value` or `- value`.
    ListItem {
        indent: usize,
        key: Option<&'a str>,
        value: &'a str,
    },
    Other {
        indent: usize,
    },
}

fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Split `key: value` at the first colon followed by whitespace or end of line.
fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let colon = bytes.iter().enumerate().position(|(i, b)| {
        *b == b':' && bytes.get(i + 1).is_none_or(|next| next.is_ascii_whitespace())
    })?;
    let key = text[..colon].trim_end();
    if key.is_empty() {
        return None;
    }
    Some((key, text[colon + 1..].trim()))
}

pub(crate) fn classify(line: &str) -> HeaderLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return HeaderLine::Blank;
    }
    if trimmed.starts_with('#') {
        return HeaderLine::Comment;
    }

    let indent = indentation(line);

    if trimmed == "-" || trimmed.starts_with("- ") {
        let rest = trimmed[1..].trim();
        return match split_key_value(rest) {
            Some((key, value)) => HeaderLine::ListItem {
                indent,
                key: Some(key),
                value,
            },
            None => HeaderLine::ListItem {
                indent,
                key: None,
                value: rest,
            },
        };
    }

    match split_key_value(trimmed) {
        Some((key, value)) => HeaderLine::Entry { indent, key, value },
        None => HeaderLine::Other { indent },
    }
}

/// One entry of a nested block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BlockEntry<'a> {
    /// Value of a bare `- value` item.
    pub bare: Option<&'a str>,
    /// `key: value` pairs in source order.
    pub fields: Vec<(&'a str, &'a str)>,
}

impl<'a> BlockEntry<'a> {
    /// Last value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// The entries nested under an anchor line such as `fields:`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Block<'a> {
    pub entries: Vec<BlockEntry<'a>>,
}

/// A header grouped into top-level scalars and nested blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Header<'a> {
    scalars: Vec<(&'a str, &'a str)>,
    blocks: Vec<(&'a str, Block<'a>)>,
}

impl<'a> Header<'a> {
    /// Last raw value recorded for a top-level key.
    pub fn scalar(&self, key: &str) -> Option<&'a str> {
        self.scalars
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn scalars(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.scalars.iter().copied()
    }

    pub fn block(&self, key: &str) -> Option<&Block<'a>> {
        self.blocks
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, b)| b)
    }
}

struct OpenBlock<'a> {
    key: &'a str,
    indent: usize,
    block: Block<'a>,
    /// Entry receiving sibling fields, and the indentation they need.
    current: Option<(usize, usize)>,
}

impl<'a> OpenBlock<'a> {
    fn new(key: &'a str, indent: usize) -> Self {
        Self {
            key,
            indent,
            block: Block::default(),
            current: None,
        }
    }

    /// Feed a line; returns false when the line closes the block.
    fn accept(&mut self, line: HeaderLine<'a>) -> bool {
        match line {
            HeaderLine::Blank => {
                self.current = None;
                true
            }
            HeaderLine::Comment => true,
            HeaderLine::ListItem { indent, key, value } if indent >= self.indent => {
                let entry = match key {
                    Some(key) => BlockEntry {
                        bare: None,
                        fields: vec![(key, value)],
                    },
                    None => BlockEntry {
                        bare: Some(value),
                        fields: Vec::new(),
                    },
                };
                self.block.entries.push(entry);
                self.current = Some((self.block.entries.len() - 1, indent + 1));
                true
            }
            HeaderLine::Entry { indent, key, value } if indent > self.indent => {
                match self.current {
                    Some((idx, min_indent)) if indent >= min_indent => {
                        self.block.entries[idx].fields.push((key, value));
                    }
                    _ => {
                        self.block.entries.push(BlockEntry {
                            bare: None,
                            fields: vec![(key, value)],
                        });
                        self.current = Some((self.block.entries.len() - 1, indent));
                    }
                }
                true
            }
            HeaderLine::Other { indent } if indent > self.indent => true,
            _ => false,
        }
    }
}

/// Group header text into scalars and blocks.
pub(crate) fn parse_header(text: &str) -> Header<'_> {
    let mut header = Header::default();
    let mut open: Option<OpenBlock<'_>> = None;

    for raw in text.lines() {
        let line = classify(raw);

        if let Some(block) = open.as_mut() {
            if block.accept(line) {
                continue;
            }
            if let Some(done) = open.take() {
                close_block(&mut header, done);
            }
        }

        if let HeaderLine::Entry { indent, key, value } = line {
            if value.is_empty() {
                open = Some(OpenBlock::new(key, indent));
            } else {
                header.scalars.push((key, value));
            }
        }
    }

    if let Some(done) = open.take() {
        close_block(&mut header, done);
    }

    header
}

fn close_block<'a>(header: &mut Header<'a>, open: OpenBlock<'a>) {
    // A bare `key:` with nothing nested under it is an empty scalar.
    if open.block.entries.is_empty() {
        header.scalars.push((open.key, ""));
    } else {
        header.blocks.push((open.key, open.block));
    }
}

/// Strip one pair of matching surrounding quotes.
pub(crate) fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse `[a, b, "c"]`. Returns `None` when not bracketed or when empty.
pub(crate) fn parse_inline_array(value: &str) -> Option<Vec<String>> {
    let inner = value.trim().strip_prefix('[')?.strip_suffix(']')?;
    let items: Vec<String> = inner
        .split(',')
        .map(|item| unquote(item.trim()).trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

/// An inline array, or a single non-empty scalar treated as a one-item list.
pub(crate) fn parse_list_value(value: &str) -> Option<Vec<String>> {
    let value = value.trim();
    if value.starts_with('[') {
        return parse_inline_array(value);
    }
    let single = unquote(value).trim();
    if single.is_empty() {
        None
    } else {
        Some(vec![single.to_string()])
    }
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    let value = unquote(value.trim());
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// A finite floating-point number.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Quote a scalar when reading it back would otherwise change it.
pub(crate) fn quote_scalar(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.trim() != value
        || value.starts_with(['"', '\'', '[', '#'])
        || value.contains('\n');
    if needs_quotes {
        format!("\"{}\"", value.replace('\n', " "))
    } else {
        value.to_string()
    }
}

/// Render a list as an inline array.
pub(crate) fn format_inline_array(items: &[String]) -> String {
    let rendered: Vec<String> = items.iter().map(|item| quote_scalar(item)).collect();
    format!("[{}]", rendered.join(", "))
}
