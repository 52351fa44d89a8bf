//! Resource node types

use serde::{Deserialize, Serialize};

/// File or directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    File,
    Directory,
}

/// Resource representation
///
/// Deserializes from scan exports shaped like
/// `{"path": "pkg/a.js", "type": "file", "size": 12, "sha1": "..."}`;
/// unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Slash-separated path, unique within a codebase
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub sha1: Option<String>,
}

impl Resource {
    pub fn file(path: impl Into<String>, size: Option<u64>, sha1: Option<&str>) -> Self {
        Self {
            path: path.into(),
            kind: ResourceKind::File,
            size,
            sha1: sha1.map(str::to_string),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ResourceKind::Directory,
            size: None,
            sha1: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == ResourceKind::File
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.path)
    }

    /// Path of the containing directory, `None` for top-level resources.
    pub fn parent_path(&self) -> Option<&str> {
        self.path.rsplit_once('/').map(|(parent, _)| parent)
    }
}
