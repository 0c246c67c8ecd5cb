//! Parsers for headers, todos and inline metadata.

pub mod coerce;
pub mod date;
pub mod frontmatter;
pub(crate) mod header;
pub mod list_type;
pub mod properties;
pub mod saved_view;
pub mod tag;
pub mod todo;

pub use coerce::coerce;
pub use date::{format_timestamp, parse_absolute, resolve_date, resolve_relative};
pub use frontmatter::{
    extract_frontmatter, remove_frontmatter, split_frontmatter, wrap_header, FrontmatterSplit,
};
pub use list_type::{format_list_type, parse_list_type};
pub use properties::{parse_item_kind, parse_item_properties};
pub use saved_view::{format_saved_view, parse_saved_view};
pub use tag::extract_tags;
pub use todo::extract_todos;
