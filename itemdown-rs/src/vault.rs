//! An in-memory collection built from `(source location, text)` pairs.
//!
//! Documents under the configured types folder are list type definitions,
//! documents under the views folder are saved views, and everything else is
//! content. Typed definitions that fail to parse are kept as diagnostics
//! instead of aborting the build.

use crate::config::Config;
use crate::error::{ItemdownError, ParseError, Result};
use crate::filter::{apply_filters, in_folder};
use crate::health::{HealthChecker, Issue};
use crate::note::Note;
use crate::search::{SearchResult, search};
use crate::types::{Item, ListType, SavedView, Timestamp, ViewFilters};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A typed definition that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub source_location: String,
    pub role: DocumentRole,
    pub error: String,
    #[serde(skip)]
    pub parse_error: Option<ParseError>,
}

impl Diagnostic {
    fn new(source_location: &str, role: DocumentRole, error: ParseError) -> Self {
        Self {
            source_location: source_location.to_string(),
            role,
            error: error.to_string(),
            parse_error: Some(error),
        }
    }

    /// The diagnostic as a host error, when the parse error is known.
    pub fn to_error(&self) -> Option<ItemdownError> {
        self.parse_error.clone().map(|error| ItemdownError::Parse {
            source_location: self.source_location.clone(),
            error,
        })
    }
}

/// What a document was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentRole {
    ListType,
    SavedView,
    Content,
}

/// Parsed items and definitions, evaluated at a single point in time.
#[derive(Debug, Clone)]
pub struct Vault {
    items: Vec<Item>,
    list_types: Vec<ListType>,
    saved_views: Vec<SavedView>,
    diagnostics: Vec<Diagnostic>,
    now: Timestamp,
}

impl Vault {
    /// Build a collection from documents supplied by the caller.
    ///
    /// `now` stamps every item and resolves relative dates in saved views.
    pub fn from_documents<I, S, T>(documents: I, config: &Config, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut vault = Self {
            items: Vec::new(),
            list_types: Vec::new(),
            saved_views: Vec::new(),
            diagnostics: Vec::new(),
            now,
        };

        for (source, text) in documents {
            vault.add(Note::new(source, text), config);
        }

        debug!(
            "built collection: {} items, {} list types, {} views, {} diagnostics",
            vault.items.len(),
            vault.list_types.len(),
            vault.saved_views.len(),
            vault.diagnostics.len()
        );
        vault
    }

    fn add(&mut self, note: Note, config: &Config) {
        let source = note.source_location.as_str();
        let role = classify(source, config);
        match role {
            DocumentRole::ListType => match note.list_type() {
                Ok(list_type) => self.list_types.push(list_type),
                Err(e) => self.reject(source, role, e),
            },
            DocumentRole::SavedView => match note.saved_view(self.now) {
                Ok(view) => {
                    if self.view(&view.name).is_some() {
                        warn!("{}: duplicate view name '{}'", source, view.name);
                    }
                    self.saved_views.push(view);
                }
                Err(e) => self.reject(source, role, e),
            },
            DocumentRole::Content => self.items.extend(note.to_items(self.now)),
        }
    }

    fn reject(&mut self, source: &str, role: DocumentRole, error: ParseError) {
        warn!("skipping {}: {}", source, error);
        self.diagnostics.push(Diagnostic::new(source, role, error));
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn list_types(&self) -> &[ListType] {
        &self.list_types
    }

    pub fn saved_views(&self) -> &[SavedView] {
        &self.saved_views
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Evaluation time this collection was built with.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// A saved view by exact name.
    pub fn view(&self, name: &str) -> Option<&SavedView> {
        self.saved_views.iter().find(|v| v.name == name)
    }

    /// The list type describing items of `kind` (case-insensitive).
    pub fn list_type_for(&self, kind: &str) -> Option<&ListType> {
        self.list_types
            .iter()
            .find(|lt| lt.name.eq_ignore_ascii_case(kind))
    }

    pub fn filter(&self, filters: &ViewFilters) -> Vec<Item> {
        apply_filters(filters, &self.items)
    }

    /// Items selected by the named saved view.
    ///
    /// When no view has that name but a view document with the same file
    /// stem failed to parse, its parse error is returned instead.
    pub fn apply_view(&self, name: &str) -> Result<Vec<Item>> {
        let view = self.view(name).ok_or_else(|| self.missing_view(name))?;
        Ok(self.filter(&view.filters))
    }

    fn missing_view(&self, name: &str) -> ItemdownError {
        self.diagnostics
            .iter()
            .filter(|d| d.role == DocumentRole::SavedView)
            .filter(|d| Note::new(d.source_location.as_str(), "").name() == name)
            .find_map(Diagnostic::to_error)
            .unwrap_or_else(|| ItemdownError::ViewNotFound(name.to_string()))
    }

    /// The list type named `name`, matched case-insensitively.
    pub fn list_type(&self, name: &str) -> Result<&ListType> {
        self.list_type_for(name)
            .ok_or_else(|| ItemdownError::ListTypeNotFound(name.to_string()))
    }

    /// Definition diagnostics and schema issues for every typed item.
    pub fn validate(&self) -> Vec<Issue> {
        HealthChecker::new(self).run()
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search(query, &self.items)
    }

    /// Every distinct tag carried by an item, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Decide how a document is read from where it lives.
pub fn classify(source_location: &str, config: &Config) -> DocumentRole {
    if in_folder(source_location, &config.types_folder) {
        DocumentRole::ListType
    } else if in_folder(source_location, &config.views_folder) {
        DocumentRole::SavedView
    } else {
        DocumentRole::Content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DisplayStyle, TODO_KIND};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn sample() -> Vault {
        let docs = vec![
            ("_types/book.md", "---\nname: book\nfields:\n  - name: rating\n    type: number\n---\n"),
            ("_types/broken.md", "---\nfields:\n  - name: x\n    type: text\n---\n"),
            ("_views/open.md", "---\nname: Open\ndisplay_style: card\nfilters:\n  completed: false\n---\n"),
            ("_views/bad.md", "---\nname: Bad\ndisplay_style: grid\n---\n"),
            ("inbox.md", "- [ ] Buy milk #home\n- [x] Pay rent #home/bills"),
            ("library/dune.md", "---\ntype: book\nrating: 5\ntags: [scifi]\n---\n"),
        ];
        Vault::from_documents(docs, &Config::default(), now())
    }

    #[test]
    fn test_classify() {
        let config = Config::default();
        assert_eq!(classify("_types/a.md", &config), DocumentRole::ListType);
        assert_eq!(classify("_views/a.md", &config), DocumentRole::SavedView);
        assert_eq!(classify("notes/_views/a.md", &config), DocumentRole::SavedView);
        assert_eq!(classify("my_views/a.md", &config), DocumentRole::Content);
    }

    #[test]
    fn test_from_documents() {
        let vault = sample();

        assert_eq!(vault.items().len(), 3);
        assert_eq!(vault.list_types().len(), 1);
        assert_eq!(vault.saved_views().len(), 1);
        assert_eq!(vault.saved_views()[0].display_style, DisplayStyle::Card);

        let failed: Vec<_> = vault
            .diagnostics()
            .iter()
            .map(|d| d.source_location.as_str())
            .collect();
        assert_eq!(failed, vec!["_types/broken.md", "_views/bad.md"]);
        assert_eq!(
            vault.diagnostics()[0].parse_error,
            Some(ParseError::MissingRequiredField("name".to_string()))
        );
    }

    #[test]
    fn test_apply_view() {
        let vault = sample();
        let open = vault.apply_view("Open").unwrap();
        let titles: Vec<_> = open.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "dune"]);

        assert!(matches!(
            vault.apply_view("Missing"),
            Err(ItemdownError::ViewNotFound(_))
        ));
        assert!(matches!(
            vault.apply_view("bad"),
            Err(ItemdownError::Parse { ref source_location, .. }) if source_location == "_views/bad.md"
        ));
    }

    #[test]
    fn test_list_type_lookup() {
        let vault = sample();
        assert_eq!(vault.list_type("Book").unwrap().fields.len(), 1);
        assert!(matches!(
            vault.list_type("movie"),
            Err(ItemdownError::ListTypeNotFound(_))
        ));
    }

    #[test]
    fn test_validate() {
        let vault = sample();
        let issues = vault.validate();
        let sources: Vec<_> = issues.iter().map(|i| i.source_location.as_str()).collect();
        assert_eq!(sources, vec!["_types/broken.md", "_views/bad.md"]);
    }

    #[test]
    fn test_queries() {
        let vault = sample();
        assert_eq!(vault.all_tags(), vec!["home", "home/bills", "scifi"]);
        assert_eq!(vault.list_type_for("BOOK").map(|lt| lt.name.as_str()), Some("book"));
        assert_eq!(vault.search("milk")[0].item.kind, TODO_KIND);
    }
}
