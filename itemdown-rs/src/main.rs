//! itemdown CLI entry point.

use chrono::Utc;
use clap::Parser;
use env_logger::Env;
use itemdown::cli::args::{Cli, Commands};
use itemdown::cli::output::Output;
use itemdown::cli::{definitions, items, scan, search, tags, validate};
use itemdown::config::Config;
use itemdown::error::{ExitCode as ItemdownExitCode, ItemdownError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<ItemdownExitCode, ItemdownError> {
    let config = Config::load()?;
    let root = config.resolve_root(cli.root.as_deref())?;

    // One clock reading per invocation.
    let vault = scan::load_vault(&root, &config, Utc::now())?;

    let output = Output::new(cli.output_format(), cli.quiet);
    output.info(&format!(
        "{}: {} items, {} list types, {} views",
        root.display(),
        vault.items().len(),
        vault.list_types().len(),
        vault.saved_views().len()
    ));

    match &cli.command {
        Commands::Items(args) => items::items(&vault, args, &output),
        Commands::View(args) => items::view(&vault, args, &output),
        Commands::Views => definitions::views(&vault, &output),
        Commands::Types(args) => definitions::types(&vault, args, &output),
        Commands::Search(args) => search::run(&vault, args, &output),
        Commands::Tags(args) => tags::run(&vault, args, &output),
        Commands::Validate(args) => validate::run(&vault, args, &output),
    }
}
