//! Codebase capability interface and the in-memory arena tree.

use crate::error::ApiError;
use crate::tree::node::{Resource, ResourceKind};
use crate::types::NodeRef;
use serde::Deserialize;
use std::collections::HashMap;

/// What the aggregator needs from a host tree.
pub trait Codebase {
    /// Every node, children before their parent.
    fn depth_first_post_order(&self) -> Vec<NodeRef>;

    fn resource(&self, node: NodeRef) -> Option<&Resource>;

    /// All file-type descendants of `node` (recursive), depth-first.
    fn file_descendants(&self, node: NodeRef) -> Vec<&Resource>;
}

#[derive(Debug, Clone)]
struct Entry {
    resource: Resource,
    parent: Option<NodeRef>,
    children: Vec<NodeRef>,
    /// Created to hold children; no resource of its own was supplied yet
    synthesized: bool,
}

/// Scan export document: `{"files": [...]}`
#[derive(Debug, Deserialize)]
struct ScanDocument {
    files: Vec<Resource>,
}

/// Arena-backed codebase.
///
/// Node 0 is a synthetic root with an empty path that owns every top-level
/// resource. Children are ordered files first, then directories, each by name.
#[derive(Debug, Clone)]
pub struct InMemoryCodebase {
    entries: Vec<Entry>,
    index: HashMap<String, NodeRef>,
}

const ROOT: NodeRef = NodeRef(0);

impl Default for InMemoryCodebase {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCodebase {
    /// Empty codebase holding only the synthetic root.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                resource: Resource::directory(""),
                parent: None,
                children: Vec::new(),
                synthesized: true,
            }],
            index: HashMap::new(),
        }
    }

    /// Build from a flat resource list in any order.
    ///
    /// Missing intermediate directories are created.
    pub fn from_resources<I>(resources: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = Resource>,
    {
        let mut codebase = Self::new();
        for resource in resources {
            codebase.insert(resource)?;
        }
        codebase.sort_children();
        Ok(codebase)
    }

    /// Build from a scan export JSON document.
    pub fn from_scan_json(text: &str) -> Result<Self, ApiError> {
        let document: ScanDocument = serde_json::from_str(text)?;
        Self::from_resources(document.files)
    }

    pub fn root(&self) -> NodeRef {
        ROOT
    }

    /// Number of nodes, including the synthetic root.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    pub fn lookup(&self, path: &str) -> Option<NodeRef> {
        self.index.get(path.trim_matches('/')).copied()
    }

    pub fn children(&self, node: NodeRef) -> &[NodeRef] {
        self.entries
            .get(node.0)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.entries.get(node.0).and_then(|e| e.parent)
    }

    fn insert(&mut self, mut resource: Resource) -> Result<NodeRef, ApiError> {
        resource.path = resource.path.trim_matches('/').to_string();
        if resource.path.is_empty() {
            return Err(ApiError::InvalidTree("resource with empty path".to_string()));
        }

        if let Some(&existing) = self.index.get(&resource.path) {
            let entry = &mut self.entries[existing.0];
            return match (entry.synthesized, resource.kind) {
                (true, ResourceKind::Directory) => {
                    entry.resource = resource;
                    entry.synthesized = false;
                    Ok(existing)
                }
                (true, ResourceKind::File) => Err(ApiError::InvalidTree(format!(
                    "{} is a file but has children",
                    resource.path
                ))),
                (false, _) => Err(ApiError::DuplicatePath(resource.path)),
            };
        }

        let parent = match resource.parent_path() {
            Some(parent_path) => self.ensure_directory(parent_path.to_string())?,
            None => ROOT,
        };
        Ok(self.push(resource, parent, false))
    }

    fn ensure_directory(&mut self, path: String) -> Result<NodeRef, ApiError> {
        if let Some(&existing) = self.index.get(&path) {
            if self.entries[existing.0].resource.is_file() {
                return Err(ApiError::InvalidTree(format!(
                    "{} is a file but has children",
                    path
                )));
            }
            return Ok(existing);
        }
        let directory = Resource::directory(path);
        let parent = match directory.parent_path() {
            Some(parent_path) => self.ensure_directory(parent_path.to_string())?,
            None => ROOT,
        };
        Ok(self.push(directory, parent, true))
    }

    fn push(&mut self, resource: Resource, parent: NodeRef, synthesized: bool) -> NodeRef {
        let node = NodeRef(self.entries.len());
        self.index.insert(resource.path.clone(), node);
        self.entries.push(Entry {
            resource,
            parent: Some(parent),
            children: Vec::new(),
            synthesized,
        });
        self.entries[parent.0].children.push(node);
        node
    }

    fn sort_children(&mut self) {
        let keys: Vec<(bool, String)> = self
            .entries
            .iter()
            .map(|e| (!e.resource.is_file(), e.resource.name().to_string()))
            .collect();
        for entry in &mut self.entries {
            entry.children.sort_by(|a, b| keys[a.0].cmp(&keys[b.0]));
        }
    }
}

impl Codebase for InMemoryCodebase {
    fn depth_first_post_order(&self) -> Vec<NodeRef> {
        let mut order = Vec::with_capacity(self.entries.len());
        let mut stack = vec![(ROOT, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            stack.push((node, true));
            for child in self.children(node).iter().rev() {
                stack.push((*child, false));
            }
        }
        order
    }

    fn resource(&self, node: NodeRef) -> Option<&Resource> {
        self.entries.get(node.0).map(|e| &e.resource)
    }

    fn file_descendants(&self, node: NodeRef) -> Vec<&Resource> {
        let mut files = Vec::new();
        let mut stack: Vec<NodeRef> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let entry = &self.entries[current.0];
            if entry.resource.is_file() {
                files.push(&entry.resource);
            }
            stack.extend(entry.children.iter().rev().copied());
        }
        files
    }
}
