//! User configuration for the document scanner.
//!
//! Stored as TOML at `<config dir>/itemdown/config.toml`. The
//! `ITEMDOWN_CONFIG` environment variable points at an alternative file.
//! A missing file yields the defaults.

use crate::error::{ItemdownError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ITEMDOWN_CONFIG";
const APP_DIR: &str = "itemdown";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Scanner and collection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default document root when `--root` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Folder holding list type definitions.
    pub types_folder: String,

    /// Folder holding saved view definitions.
    pub views_folder: String,

    /// Glob patterns, relative to the root, that are never scanned.
    pub exclude: Vec<String>,

    /// File extensions treated as documents.
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            types_folder: "_types".to_string(),
            views_folder: "_views".to_string(),
            exclude: vec![
                ".git/**".to_string(),
                ".obsidian/**".to_string(),
                ".trash/**".to_string(),
            ],
            extensions: vec!["md".to_string(), "markdown".to_string(), "txt".to_string()],
        }
    }
}

impl Config {
    /// Path of the config file, honouring `ITEMDOWN_CONFIG`.
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.types_folder.trim().is_empty() {
            return Err(ItemdownError::ConfigError("types_folder must not be empty".to_string()));
        }
        if self.views_folder.trim().is_empty() {
            return Err(ItemdownError::ConfigError("views_folder must not be empty".to_string()));
        }
        for pattern in &self.exclude {
            glob::Pattern::new(pattern)?;
        }
        Ok(())
    }

    /// Pick the document root: explicit argument, then config, then the
    /// current directory.
    pub fn resolve_root(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        let root = match (explicit, &self.root) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path.clone(),
            (None, None) => env::current_dir()?,
        };

        if !root.is_dir() {
            return Err(ItemdownError::RootNotFound(root));
        }
        Ok(root)
    }

    /// Whether a root-relative path is excluded from scanning.
    pub fn is_excluded(&self, relative: &str) -> bool {
        let relative = relative.replace('\\', "/");
        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&relative))
                .unwrap_or(false)
        })
    }

    /// Whether a file has one of the configured document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.types_folder, "_types");
        assert_eq!(config.views_folder, "_views");
        assert!(config.root.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("views_folder = \"views\"\nextensions = [\"md\"]").unwrap();
        assert_eq!(config.views_folder, "views");
        assert_eq!(config.types_folder, "_types");
        assert_eq!(config.extensions, vec!["md"]);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("exclude = 3"),
            Err(ItemdownError::TomlParse(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_toml("types_folder = \"\""),
            Err(ItemdownError::ConfigError(_))
        ));
        assert!(matches!(
            Config::from_toml("exclude = [\"[\"]"),
            Err(ItemdownError::GlobPattern(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "root = \"/notes\"").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("/notes")));
    }

    #[test]
    fn test_resolve_root() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();

        assert_eq!(config.resolve_root(Some(dir.path())).unwrap(), dir.path());

        let missing = dir.path().join("missing");
        assert!(matches!(
            config.resolve_root(Some(&missing)),
            Err(ItemdownError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_is_excluded() {
        let config = Config::default();
        assert!(config.is_excluded(".git/HEAD"));
        assert!(config.is_excluded(".obsidian/workspace.md"));
        assert!(!config.is_excluded("notes/today.md"));
    }

    #[test]
    fn test_is_document() {
        let config = Config::default();
        assert!(config.is_document(Path::new("a/b.md")));
        assert!(config.is_document(Path::new("b.TXT")));
        assert!(!config.is_document(Path::new("image.png")));
        assert!(!config.is_document(Path::new("Makefile")));
    }
}
