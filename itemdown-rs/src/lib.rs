//! itemdown - typed items, todos and saved views from markdown notes.
//!
//! # Overview
//!
//! Documents are plain text with an optional `---` delimited header. From
//! them itemdown derives:
//! - Todo items from checkbox lines, with due dates, priorities and tags
//! - Typed note items from documents whose header declares a `type`
//! - List type schemas and saved views from definition documents
//! - Hierarchical tags with single-level wildcard patterns
//! - Filtering by saved view predicates and ranked free-text search
//!
//! The core is pure: callers hand in document text and the evaluation time,
//! nothing reads the clock or the file system. The `itemdown` binary is the
//! file-system collaborator.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use itemdown::{Config, Vault};
//!
//! let docs = vec![
//!     ("_views/today.md", "---\nname: Today\nfilters:\n  completed: false\n---\n"),
//!     ("inbox.md", "- [ ] Call the bank #errands\n- [x] Water plants"),
//! ];
//! let vault = Vault::from_documents(docs, &Config::default(), Utc::now());
//!
//! let open = vault.apply_view("Today").unwrap();
//! assert_eq!(open.len(), 1);
//! assert_eq!(open[0].tags, vec!["errands"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod health;
pub mod note;
pub mod parser;
pub mod search;
pub mod tags;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{ItemdownError, ParseError, Result};
pub use filter::apply_filters;
pub use note::Note;
pub use parser::{
    coerce, extract_frontmatter, extract_todos, parse_item_properties, parse_list_type,
    parse_saved_view, resolve_relative, split_frontmatter,
};
pub use search::search;
pub use types::*;
pub use vault::Vault;
