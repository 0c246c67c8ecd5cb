//! A single source document and the items it yields.

use crate::error::{ParseError, Result};
use crate::parser::header::{parse_header, parse_list_value, unquote};
use crate::parser::tag::normalize;
use crate::parser::{
    self, parse_item_kind, parse_item_properties, parse_list_type, parse_saved_view,
    split_frontmatter, todo::extract_todos_from_line,
};
use crate::types::{Item, ListType, SavedView, Timestamp};
use std::path::Path;

const TITLE_KEY: &str = "title";
const TAGS_KEY: &str = "tags";

/// A document: an opaque source location plus its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Origin of the text, usually a root-relative path such as `proj/plan.md`.
    pub source_location: String,

    /// Raw content of the document.
    pub content: String,
}

impl Note {
    pub fn new(source_location: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_location: source_location.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk, keyed by its root-relative path.
    pub fn load(root: &Path, relative_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(root.join(relative_path))?;
        let source_location = relative_path.to_string_lossy().replace('\\', "/");
        Ok(Self::new(source_location, content))
    }

    /// File name without extension.
    pub fn name(&self) -> &str {
        Path::new(&self.source_location)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Raw header text, if the document has one.
    pub fn header(&self) -> Option<&str> {
        parser::extract_frontmatter(&self.content)
    }

    /// Content after the header.
    pub fn body(&self) -> &str {
        split_frontmatter(&self.content).body
    }

    /// Line number (1-indexed) where the body starts.
    pub fn body_start_line(&self) -> usize {
        split_frontmatter(&self.content).body_start_line
    }

    /// The `type` declared in the header.
    pub fn kind(&self) -> Option<String> {
        self.header().and_then(parse_item_kind)
    }

    /// Read this document as a list type definition.
    pub fn list_type(&self) -> std::result::Result<ListType, ParseError> {
        parse_list_type(self.header().unwrap_or_default())
    }

    /// Read this document as a saved view definition.
    pub fn saved_view(&self, now: Timestamp) -> std::result::Result<SavedView, ParseError> {
        parse_saved_view(self.header().unwrap_or_default(), now)
    }

    /// The typed note item declared by the header, if any.
    ///
    /// The title comes from the `title` property, else the file name. Tags
    /// come from the `tags` header key, as an inline array, a single value
    /// or a nested list.
    pub fn note_item(&self, now: Timestamp) -> Option<Item> {
        let header = self.header()?;
        let kind = parse_item_kind(header)?;
        let parsed = parse_header(header);

        let title = parsed
            .scalar(TITLE_KEY)
            .map(|t| unquote(t).trim())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.name());

        let mut tags: Vec<String> = parsed
            .scalar(TAGS_KEY)
            .and_then(parse_list_value)
            .unwrap_or_default();
        if let Some(block) = parsed.block(TAGS_KEY) {
            tags.extend(
                block
                    .entries
                    .iter()
                    .filter_map(|e| e.bare)
                    .map(|t| unquote(t).to_string()),
            );
        }
        let tags: Vec<String> = tags
            .iter()
            .filter_map(|t| normalize(t))
            .map(str::to_string)
            .collect();

        let mut properties = parse_item_properties(header);
        properties.remove(TITLE_KEY);
        properties.remove(TAGS_KEY);

        Item::new(
            Item::derive_id(&self.source_location, None),
            kind,
            title,
            self.source_location.as_str(),
            now,
        )
        .map(|item| item.with_tags(tags).with_properties(properties))
    }

    /// Every item in the document: the typed note item (if the header
    /// declares a `type`) followed by the body's todos.
    pub fn to_items(&self, now: Timestamp) -> Vec<Item> {
        let split = split_frontmatter(&self.content);
        let mut items: Vec<Item> = self.note_item(now).into_iter().collect();
        items.extend(extract_todos_from_line(
            split.body,
            &self.source_location,
            split.body_start_line,
            now,
        ));
        items
    }
}
