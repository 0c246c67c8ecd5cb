//! Listing of saved views and list types.

use crate::cli::args::TypesArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::types::{ListType, SavedView};
use crate::vault::{Diagnostic, DocumentRole, Vault};
use serde::Serialize;

/// Output for the views command.
#[derive(Debug, Serialize)]
pub struct ViewsOutput {
    pub views: Vec<SavedView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Output for the types command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesOutput {
    pub list_types: Vec<ListType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

fn diagnostics_for(vault: &Vault, role: DocumentRole) -> Vec<Diagnostic> {
    vault
        .diagnostics()
        .iter()
        .filter(|d| d.role == role)
        .cloned()
        .collect()
}

/// List saved views along with view documents that failed to parse.
pub fn views(vault: &Vault, output: &Output) -> Result<ExitCode> {
    let diagnostics = diagnostics_for(vault, DocumentRole::SavedView);
    for d in &diagnostics {
        output.warn(&format!("{}: {}", d.source_location, d.error));
    }

    let result = ViewsOutput {
        views: vault.saved_views().to_vec(),
        diagnostics,
    };
    output.print(&result)?;

    Ok(ExitCode::Success)
}

/// List list types, or show the one named in `args`.
pub fn types(vault: &Vault, args: &TypesArgs, output: &Output) -> Result<ExitCode> {
    if let Some(name) = &args.name {
        let list_type = vault.list_type(name)?;
        output.print(list_type)?;
        return Ok(ExitCode::Success);
    }

    let diagnostics = diagnostics_for(vault, DocumentRole::ListType);
    for d in &diagnostics {
        output.warn(&format!("{}: {}", d.source_location, d.error));
    }

    let result = TypesOutput {
        list_types: vault.list_types().to_vec(),
        diagnostics,
    };
    output.print(&result)?;

    Ok(ExitCode::Success)
}
