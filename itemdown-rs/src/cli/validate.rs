//! Validate command for typed items and definitions.

use crate::cli::args::ValidateArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::health::{
    HealthChecker, Issue, IssueType, ValidationSummary, compute_summary, format_github_actions,
};
use crate::vault::Vault;
use serde::Serialize;

/// Output for validate command.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub issues: Vec<Issue>,
    pub summary: ValidationSummary,
}

/// Output format for validate command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateFormat {
    Json,
    Text,
    Github,
}

impl ValidateFormat {
    pub fn from_name(s: &str) -> Option<ValidateFormat> {
        match s.to_lowercase().as_str() {
            "json" => Some(ValidateFormat::Json),
            "text" => Some(ValidateFormat::Text),
            "github" => Some(ValidateFormat::Github),
            _ => None,
        }
    }
}

fn issue_types(names: &[String], output: &Output) -> Vec<IssueType> {
    names
        .iter()
        .filter_map(|name| {
            let issue_type = IssueType::from_name(name);
            if issue_type.is_none() {
                output.warn(&format!("unknown issue type '{}'", name));
            }
            issue_type
        })
        .collect()
}

/// Check the collection and report issues.
///
/// Exits with [`ExitCode::ValidationIssuesFound`] when anything is reported.
pub fn run(vault: &Vault, args: &ValidateArgs, output: &Output) -> Result<ExitCode> {
    let format = ValidateFormat::from_name(&args.format).unwrap_or_else(|| {
        output.warn(&format!("unknown format '{}', using json", args.format));
        ValidateFormat::Json
    });

    let mut checker = HealthChecker::new(vault);

    let only = issue_types(&args.only, output);
    if !only.is_empty() {
        checker = checker.only(only);
    }

    let ignore = issue_types(&args.ignore, output);
    if !ignore.is_empty() {
        checker = checker.ignore(ignore);
    }

    let issues = checker.run();
    let summary = compute_summary(&issues);
    let code = if issues.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::ValidationIssuesFound
    };

    match format {
        ValidateFormat::Json => {
            output.print(&ValidateOutput { issues, summary })?;
        }
        ValidateFormat::Text => {
            if issues.is_empty() {
                output.print_raw("No issues found.");
            } else {
                for issue in &issues {
                    let field = issue
                        .field
                        .as_deref()
                        .map(|f| format!(" ({})", f))
                        .unwrap_or_default();
                    output.print_raw(&format!("[{}] {}{}", issue.issue_type, issue.source_location, field));
                    output.print_raw(&format!("  {}", issue.message));
                }
                output.print_raw("---");
                output.print_raw(&format!("Total: {} issues ({} errors)", summary.total, summary.errors));
                for (issue_type, count) in &summary.by_type {
                    output.print_raw(&format!("  {}: {}", issue_type, count));
                }
            }
        }
        ValidateFormat::Github => {
            print!("{}", format_github_actions(&issues));
        }
    }

    Ok(code)
}
