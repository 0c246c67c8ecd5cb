//! Reads a document root from disk into a collection.

use crate::config::Config;
use crate::error::Result;
use crate::note::Note;
use crate::types::Timestamp;
use crate::vault::Vault;
use glob::glob;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Root-relative paths of every document under `root`, sorted.
///
/// Files are kept when their extension is listed in the config and no
/// exclude pattern matches their relative path.
pub fn list_documents(root: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let pattern = root.join("**/*");
    let pattern_str = pattern.to_string_lossy();

    let mut documents = Vec::new();

    for entry in glob(&pattern_str)? {
        match entry {
            Ok(path) => {
                if !path.is_file() || !config.is_document(&path) {
                    continue;
                }
                let Ok(relative) = path.strip_prefix(root) else {
                    continue;
                };
                if config.is_excluded(&relative.to_string_lossy()) {
                    debug!("excluded {}", relative.display());
                    continue;
                }
                documents.push(relative.to_path_buf());
            }
            Err(e) => warn!("glob error: {}", e),
        }
    }

    documents.sort();
    Ok(documents)
}

/// Read every document under `root` and build a collection at `now`.
pub fn load_vault(root: &Path, config: &Config, now: Timestamp) -> Result<Vault> {
    let notes = list_documents(root, config)?
        .iter()
        .map(|relative| Note::load(root, relative))
        .collect::<Result<Vec<_>>>()?;

    debug!("read {} documents from {}", notes.len(), root.display());
    Ok(Vault::from_documents(
        notes.into_iter().map(|n| (n.source_location, n.content)),
        config,
        now,
    ))
}
