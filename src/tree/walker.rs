//! Filesystem walker
//!
//! Builds an [`InMemoryCodebase`] from a directory on disk. Paths start with the
//! root directory's own name (`project/src/main.rs`), are slash-separated on every
//! platform, and carry the file size and SHA-1 of the file contents.

use crate::error::ApiError;
use crate::tree::codebase::InMemoryCodebase;
use crate::tree::node::Resource;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Walker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Follow symbolic links (default: false)
    #[serde(default)]
    pub follow_links: bool,

    /// Include dot-files and dot-directories (default: false)
    #[serde(default)]
    pub include_hidden: bool,

    /// Maximum depth below the root; None walks everything
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            include_hidden: false,
            max_depth: None,
        }
    }
}

/// Walk `root` and collect its resources.
///
/// Unreadable entries are skipped with a warning. A file whose contents cannot be
/// read is kept without a checksum.
pub fn walk_directory(root: &Path, config: &WalkerConfig) -> Result<InMemoryCodebase, ApiError> {
    let canonical = root.canonicalize().map_err(|e| ApiError::Io {
        path: root.display().to_string(),
        source: e,
    })?;
    if !canonical.is_dir() {
        return Err(ApiError::InvalidTree(format!(
            "{} is not a directory",
            canonical.display()
        )));
    }
    let root_name = canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ApiError::InvalidTree(format!("{} has no directory name", canonical.display()))
        })?;

    let mut walker = WalkDir::new(&canonical)
        .follow_links(config.follow_links)
        .sort_by_file_name();
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    let include_hidden = config.include_hidden;
    let mut resources = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let path = resource_path(&root_name, &canonical, entry.path());
        let file_type = entry.file_type();
        if file_type.is_dir() {
            resources.push(Resource::directory(path));
        } else if file_type.is_file() {
            let size = entry.metadata().ok().map(|m| m.len());
            let sha1 = match sha1_file(entry.path()) {
                Ok(digest) => Some(digest),
                Err(e) => {
                    warn!(path = %path, error = %e, "Could not checksum file");
                    None
                }
            };
            resources.push(Resource {
                sha1,
                ..Resource::file(path, size, None)
            });
        } else {
            debug!(path = %path, "Skipping special file");
        }
    }

    debug!(root = %canonical.display(), resources = resources.len(), "Walk complete");
    InMemoryCodebase::from_resources(resources)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn resource_path(root_name: &str, root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut out = root_name.to_string();
    for component in relative.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}

/// Hex SHA-1 of a file's contents.
pub fn sha1_file(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha1::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
