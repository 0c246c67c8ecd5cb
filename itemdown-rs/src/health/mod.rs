//! Schema validation of typed notes and definition diagnostics.

use crate::types::{FieldDefinition, FieldType, Item, ListType};
use crate::vault::Vault;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Types of issues that can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    MissingRequiredField,
    TypeMismatch,
    BelowMinimum,
    AboveMaximum,
    InvalidDefinition,
}

impl IssueType {
    /// All issue types.
    pub fn all() -> &'static [IssueType] {
        &[
            IssueType::MissingRequiredField,
            IssueType::TypeMismatch,
            IssueType::BelowMinimum,
            IssueType::AboveMaximum,
            IssueType::InvalidDefinition,
        ]
    }

    /// Parse from the kebab-case name.
    pub fn from_name(s: &str) -> Option<IssueType> {
        match s {
            "missing-required-field" => Some(IssueType::MissingRequiredField),
            "type-mismatch" => Some(IssueType::TypeMismatch),
            "below-minimum" => Some(IssueType::BelowMinimum),
            "above-maximum" => Some(IssueType::AboveMaximum),
            "invalid-definition" => Some(IssueType::InvalidDefinition),
            _ => None,
        }
    }

    /// Whether the issue blocks a document from loading at all.
    pub fn is_error(&self) -> bool {
        matches!(self, IssueType::InvalidDefinition | IssueType::MissingRequiredField)
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::MissingRequiredField => write!(f, "missing-required-field"),
            IssueType::TypeMismatch => write!(f, "type-mismatch"),
            IssueType::BelowMinimum => write!(f, "below-minimum"),
            IssueType::AboveMaximum => write!(f, "above-maximum"),
            IssueType::InvalidDefinition => write!(f, "invalid-definition"),
        }
    }
}

/// A detected issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub source_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// Summary of validation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub errors: usize,
}

impl ListType {
    /// Check an item's properties against this schema.
    ///
    /// Only numbers carry `min`/`max` bounds. Text fields accept any value.
    pub fn validate(&self, item: &Item) -> Vec<Issue> {
        self.fields
            .iter()
            .filter_map(|field| check_field(field, item))
            .collect()
    }
}

fn check_field(field: &FieldDefinition, item: &Item) -> Option<Issue> {
    let issue = |issue_type, message: String| Issue {
        issue_type,
        source_location: item.source_location.clone(),
        item_id: Some(item.id.clone()),
        field: Some(field.name.clone()),
        message,
    };

    let Some(value) = item.property(&field.name) else {
        return field.required.then(|| {
            issue(
                IssueType::MissingRequiredField,
                format!("'{}' is missing required field '{}'", item.title, field.name),
            )
        });
    };

    let type_ok =
        field.field_type == FieldType::Text || value.field_type() == Some(field.field_type);
    if !type_ok {
        return Some(issue(
            IssueType::TypeMismatch,
            format!(
                "'{}' field '{}' should be {}, got '{}'",
                item.title, field.name, field.field_type, value
            ),
        ));
    }

    let number = value.as_number()?;
    if let Some(min) = field.min.filter(|min| number < *min) {
        return Some(issue(
            IssueType::BelowMinimum,
            format!("'{}' field '{}' is {}, below minimum {}", item.title, field.name, number, min),
        ));
    }
    if let Some(max) = field.max.filter(|max| number > *max) {
        return Some(issue(
            IssueType::AboveMaximum,
            format!("'{}' field '{}' is {}, above maximum {}", item.title, field.name, number, max),
        ));
    }
    None
}

/// Run validation over a collection.
pub struct HealthChecker<'a> {
    vault: &'a Vault,
    include_types: Option<HashSet<IssueType>>,
    exclude_types: HashSet<IssueType>,
}

impl<'a> HealthChecker<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self {
            vault,
            include_types: None,
            exclude_types: HashSet::new(),
        }
    }

    /// Only report specific issue types.
    pub fn only(mut self, types: Vec<IssueType>) -> Self {
        self.include_types = Some(types.into_iter().collect());
        self
    }

    /// Exclude specific issue types.
    pub fn ignore(mut self, types: Vec<IssueType>) -> Self {
        self.exclude_types = types.into_iter().collect();
        self
    }

    fn should_report(&self, issue_type: IssueType) -> bool {
        if self.exclude_types.contains(&issue_type) {
            return false;
        }
        if let Some(ref include) = self.include_types {
            return include.contains(&issue_type);
        }
        true
    }

    /// Definition diagnostics first, then schema issues in item order.
    ///
    /// Items whose kind has no list type are not checked.
    pub fn run(&self) -> Vec<Issue> {
        let definitions = self.vault.diagnostics().iter().map(|d| Issue {
            issue_type: IssueType::InvalidDefinition,
            source_location: d.source_location.clone(),
            item_id: None,
            field: None,
            message: d.error.clone(),
        });

        let schema = self.vault.items().iter().flat_map(|item| {
            self.vault
                .list_type_for(&item.kind)
                .map(|list_type| list_type.validate(item))
                .unwrap_or_default()
        });

        definitions
            .chain(schema)
            .filter(|issue| self.should_report(issue.issue_type))
            .collect()
    }
}

/// Compute summary from issues.
pub fn compute_summary(issues: &[Issue]) -> ValidationSummary {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut errors = 0;

    for issue in issues {
        *by_type.entry(issue.issue_type.to_string()).or_insert(0) += 1;
        if issue.issue_type.is_error() {
            errors += 1;
        }
    }

    ValidationSummary {
        total: issues.len(),
        by_type,
        errors,
    }
}

/// Format issues as GitHub Actions annotations.
pub fn format_github_actions(issues: &[Issue]) -> String {
    let mut output = String::new();

    for issue in issues {
        let level = if issue.issue_type.is_error() { "error" } else { "warning" };
        output.push_str(&format!(
            "::{} file={}::{}\n",
            level, issue.source_location, issue.message
        ));
    }

    output
}
