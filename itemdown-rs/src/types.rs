//! Shared types for itemdown.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Point in time used for every date in the model.
pub type Timestamp = DateTime<Utc>;

/// Kind assigned to items extracted from checkbox lines.
pub const TODO_KIND: &str = "todo";

/// Property holding an item's due date.
pub const DUE_DATE_PROPERTY: &str = "dueDate";

/// Property holding an item's priority ("high", "medium" or "low").
pub const PRIORITY_PROPERTY: &str = "priority";

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Date(Timestamp),
    Bool(bool),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            PropertyValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The schema type this value satisfies.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            PropertyValue::Text(_) => Some(FieldType::Text),
            PropertyValue::Number(_) => Some(FieldType::Number),
            PropertyValue::Date(_) => Some(FieldType::Date),
            PropertyValue::Bool(_) => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Date(d) => {
                if d.hour() == 0 && d.minute() == 0 && d.second() == 0 {
                    write!(f, "{}", d.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", d.format("%Y-%m-%dT%H:%M"))
                }
            }
            PropertyValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Todo priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Marker emoji used in todo text.
    pub fn emoji(self) -> &'static str {
        match self {
            Priority::High => "⏫",
            Priority::Medium => "🔼",
            Priority::Low => "🔽",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// A parsed record: a todo or a typed note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable identifier, identical across parse passes of the same source.
    pub id: String,

    /// Free-form type tag ("todo", "book", ...).
    pub kind: String,

    /// Display text. Never empty.
    pub title: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,

    /// Hierarchical tags in first-seen order, without the leading `#`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub completed: bool,

    /// Opaque identifier of the origin document.
    pub source_location: String,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Item {
    /// Build an item, trimming the title and de-duplicating tags.
    ///
    /// Returns `None` when the title is empty after trimming.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        title: &str,
        source_location: impl Into<String>,
        now: Timestamp,
    ) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id: id.into(),
            kind: kind.into(),
            title: title.to_string(),
            properties: BTreeMap::new(),
            tags: Vec::new(),
            completed: false,
            source_location: source_location.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Stable identifier for an item anchored at `line` of `source_location`,
    /// or at the document itself when `line` is `None`.
    pub fn derive_id(source_location: &str, line: Option<usize>) -> String {
        let name = match line {
            Some(line) => format!("itemdown:{source_location}#L{line}"),
            None => format!("itemdown:{source_location}"),
        };
        Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()).to_string()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.tags = crate::tags::unique_tags(&tags);
        self
    }

    pub fn with_properties(mut self, properties: BTreeMap<String, PropertyValue>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// A copy of this item with a new completion state, stamped `now`.
    pub fn with_completed(&self, completed: bool, now: Timestamp) -> Self {
        Self {
            completed,
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// The `dueDate` property, when present and date-typed.
    pub fn due_date(&self) -> Option<Timestamp> {
        self.property(DUE_DATE_PROPERTY).and_then(PropertyValue::as_date)
    }

    pub fn priority(&self) -> Option<Priority> {
        self.property(PRIORITY_PROPERTY)
            .and_then(PropertyValue::as_text)
            .and_then(|p| p.parse().ok())
    }
}

/// Value type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::Number => write!(f, "number"),
            FieldType::Date => write!(f, "date"),
        }
    }
}

impl std::str::FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "number" => Ok(FieldType::Number),
            "date" => Ok(FieldType::Date),
            _ => Err(format!("Invalid field type: {}", s)),
        }
    }
}

/// One field of a list type schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A named schema describing the expected properties of one item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListType {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,

    /// Opaque prompt for an external extraction pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_extraction_prompt: Option<String>,
}

impl ListType {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Presentation hint for a saved view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    #[default]
    List,
    Card,
}

impl std::fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayStyle::List => write!(f, "list"),
            DisplayStyle::Card => write!(f, "card"),
        }
    }
}

impl std::str::FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(DisplayStyle::List),
            "card" => Ok(DisplayStyle::Card),
            _ => Err(format!("Invalid display style: {}", s)),
        }
    }
}

/// Filter predicates of a saved view. `None` leaves an axis unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFilters {
    /// Tags or single-level wildcard patterns such as `work/*`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_types: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_before: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_after: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub folders: Option<Vec<String>>,
}

impl ViewFilters {
    /// True when no axis carries a constraint.
    pub fn is_empty(&self) -> bool {
        fn unset<T>(list: &Option<Vec<T>>) -> bool {
            list.as_ref().is_none_or(|l| l.is_empty())
        }
        unset(&self.tags)
            && unset(&self.item_types)
            && unset(&self.folders)
            && self.due_before.is_none()
            && self.due_after.is_none()
            && self.completed.is_none()
    }
}

/// A named, persisted query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedView {
    pub name: String,

    #[serde(default)]
    pub display_style: DisplayStyle,

    #[serde(default)]
    pub filters: ViewFilters,
}
