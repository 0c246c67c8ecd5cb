//! CLI command implementations.

pub mod args;
pub mod output;
pub mod scan;

pub mod definitions;
pub mod items;
pub mod search;
pub mod tags;
pub mod validate;

pub use args::{Cli, Commands};
pub use output::Output;
