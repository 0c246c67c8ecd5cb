//! Search command implementation.

use crate::cli::args::SearchArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::search::SearchResult;
use crate::vault::Vault;
use serde::Serialize;

/// Output for search command.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total: usize,
}

/// Rank items against the query and print the best `limit` results.
pub fn run(vault: &Vault, args: &SearchArgs, output: &Output) -> Result<ExitCode> {
    let mut results = vault.search(&args.query);
    let total = results.len();
    results.truncate(args.limit);

    let result = SearchOutput {
        query: args.query.clone(),
        results,
        total,
    };
    output.print(&result)?;

    Ok(ExitCode::Success)
}
