//! Error types and exit codes for itemdown.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes returned by the `itemdown` binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_DOCUMENT: i32 = 5;
    pub const VALIDATION_ISSUES_FOUND: i32 = 10;
}

/// Structural failure while reading a typed header (list type or saved view).
///
/// Free-form content never produces one of these; only documents that
/// declare a schema or a view are rejected outright.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    #[error("invalid value for '{field}': expected {expected}, got '{got}'")]
    InvalidFieldType {
        field: String,
        expected: String,
        got: String,
    },
}

impl ParseError {
    pub(crate) fn missing(field: &str) -> Self {
        ParseError::MissingRequiredField(field.to_string())
    }

    pub(crate) fn invalid(field: &str, expected: &str, got: &str) -> Self {
        ParseError::InvalidFieldType {
            field: field.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}

/// Main error type for itemdown operations outside the pure core.
#[derive(Error, Debug)]
pub enum ItemdownError {
    #[error("Invalid document {source_location}: {error}")]
    Parse {
        source_location: String,
        error: ParseError,
    },

    #[error("Document root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Saved view not found: {0}")]
    ViewNotFound(String),

    #[error("List type not found: {0}")]
    ListTypeNotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialize error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl ItemdownError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ItemdownError::RootNotFound(_)
            | ItemdownError::ViewNotFound(_)
            | ItemdownError::ListTypeNotFound(_) => exit_code::NOT_FOUND,
            ItemdownError::Parse { .. } => exit_code::INVALID_DOCUMENT,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for itemdown operations.
pub type Result<T> = std::result::Result<T, ItemdownError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    NotFound,
    InvalidDocument,
    ValidationIssuesFound,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::NotFound => exit_code::NOT_FOUND,
            ExitCode::InvalidDocument => exit_code::INVALID_DOCUMENT,
            ExitCode::ValidationIssuesFound => exit_code::VALIDATION_ISSUES_FOUND,
        }
    }
}
