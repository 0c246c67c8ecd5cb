//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "itemdown")]
#[command(author, version, about = "Typed items, todos and saved views from markdown notes", long_about = None)]
pub struct Cli {
    /// Path to the document root (overrides config default)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items matching ad-hoc filters
    Items(ItemsArgs),

    /// Apply a saved view
    View(ViewArgs),

    /// List saved views
    Views,

    /// List list types, or show one
    Types(TypesArgs),

    /// Rank items against a free-text query
    Search(SearchArgs),

    /// List tags across all items
    Tags(TagsArgs),

    /// Check typed items against their list types
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
pub struct ItemsArgs {
    /// Item kind, e.g. todo or book (repeatable)
    #[arg(long)]
    pub kind: Vec<String>,

    /// Tag or wildcard pattern such as project/* (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,

    /// Folder the item's document lives in (repeatable)
    #[arg(long)]
    pub folder: Vec<String>,

    /// Only completed items
    #[arg(long, conflicts_with = "open")]
    pub completed: bool,

    /// Only open items
    #[arg(long)]
    pub open: bool,

    /// Due strictly before this date (YYYY-MM-DD or a token like +1w)
    #[arg(long, allow_hyphen_values = true)]
    pub due_before: Option<String>,

    /// Due strictly after this date (YYYY-MM-DD or a token like -3d)
    #[arg(long, allow_hyphen_values = true)]
    pub due_after: Option<String>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Name of the saved view
    pub name: String,
}

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Show a single list type
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Number of results
    #[arg(long, default_value = "10")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Only tags matching this pattern (supports *)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Include usage counts
    #[arg(long)]
    pub with_counts: bool,

    /// Group tags under their root segment
    #[arg(long)]
    pub nested: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Only report specific issue type (repeatable)
    #[arg(long)]
    pub only: Vec<String>,

    /// Skip specific issue type (repeatable)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Output format: json, text, github
    #[arg(long, default_value = "json")]
    pub format: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["itemdown", "--root", "/notes", "--yaml", "-vv", "views"]);
        assert_eq!(cli.root, Some(PathBuf::from("/notes")));
        assert_eq!(cli.output_format(), OutputFormat::Yaml);
        assert_eq!(cli.log_level(), "debug");
        assert!(matches!(cli.command, Commands::Views));
    }

    #[test]
    fn test_items_args() {
        let cli = Cli::parse_from([
            "itemdown", "items", "--kind", "todo", "--tag", "work/*", "--tag", "home", "--open",
            "--due-before", "+1w",
        ]);
        let Commands::Items(args) = cli.command else {
            panic!("expected items command");
        };
        assert_eq!(args.kind, vec!["todo"]);
        assert_eq!(args.tag, vec!["work/*", "home"]);
        assert!(args.open);
        assert_eq!(args.due_before.as_deref(), Some("+1w"));
    }

    #[test]
    fn test_conflicting_flags() {
        assert!(Cli::try_parse_from(["itemdown", "--json", "--toml", "views"]).is_err());
        assert!(Cli::try_parse_from(["itemdown", "items", "--completed", "--open"]).is_err());
    }
}
