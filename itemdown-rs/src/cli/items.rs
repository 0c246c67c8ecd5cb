//! Item listing commands: ad-hoc filters and saved views.

use crate::cli::args::{ItemsArgs, ViewArgs};
use crate::cli::output::Output;
use crate::error::{ExitCode, ItemdownError, Result};
use crate::parser::resolve_date;
use crate::types::{DisplayStyle, Item, Timestamp, ViewFilters};
use crate::vault::Vault;
use serde::Serialize;

/// Output for item listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_style: Option<DisplayStyle>,
    pub filters: ViewFilters,
    pub items: Vec<Item>,
    pub total: usize,
}

/// Turn command-line flags into view filters, resolving dates at `now`.
pub fn build_filters(args: &ItemsArgs, now: Timestamp) -> Result<ViewFilters> {
    let date = |value: &Option<String>| -> Result<Option<Timestamp>> {
        value
            .as_deref()
            .map(|raw| resolve_date(raw, now).ok_or_else(|| ItemdownError::InvalidDate(raw.to_string())))
            .transpose()
    };

    let completed = match (args.completed, args.open) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    Ok(ViewFilters {
        tags: non_empty(&args.tag),
        item_types: non_empty(&args.kind),
        due_before: date(&args.due_before)?,
        due_after: date(&args.due_after)?,
        completed,
        folders: non_empty(&args.folder),
    })
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

/// List items matching ad-hoc filters.
pub fn items(vault: &Vault, args: &ItemsArgs, output: &Output) -> Result<ExitCode> {
    let filters = build_filters(args, vault.now())?;
    let items = vault.filter(&filters);

    let result = ItemsOutput {
        view: None,
        display_style: None,
        filters,
        total: items.len(),
        items,
    };
    output.print(&result)?;

    Ok(ExitCode::Success)
}

/// Apply a saved view by name.
pub fn view(vault: &Vault, args: &ViewArgs, output: &Output) -> Result<ExitCode> {
    let items = vault.apply_view(&args.name)?;
    let (display_style, filters) = vault
        .view(&args.name)
        .map(|v| (v.display_style, v.filters.clone()))
        .unwrap_or_default();

    let result = ItemsOutput {
        view: Some(args.name.clone()),
        display_style: Some(display_style),
        filters,
        total: items.len(),
        items,
    };
    output.print(&result)?;

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_build_filters() {
        let args = ItemsArgs {
            kind: vec!["todo".to_string()],
            tag: vec!["work/*".to_string()],
            open: true,
            due_before: Some("+1w".to_string()),
            due_after: Some("2024-02-01".to_string()),
            ..Default::default()
        };
        let filters = build_filters(&args, now()).unwrap();

        assert_eq!(filters.item_types, Some(vec!["todo".to_string()]));
        assert_eq!(filters.tags, Some(vec!["work/*".to_string()]));
        assert_eq!(filters.folders, None);
        assert_eq!(filters.completed, Some(false));
        assert_eq!(filters.due_before, Some(Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap()));
        assert_eq!(filters.due_after, Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_no_flags_no_constraints() {
        let filters = build_filters(&ItemsArgs::default(), now()).unwrap();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_invalid_date() {
        let args = ItemsArgs {
            due_before: Some("someday".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_filters(&args, now()),
            Err(ItemdownError::InvalidDate(ref raw)) if raw == "someday"
        ));
    }
}
