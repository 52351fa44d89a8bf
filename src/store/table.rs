//! In-memory fingerprint table

use crate::error::StorageError;
use crate::store::{DirectoryFingerprints, FingerprintRecord, FingerprintStore};
use crate::types::NodeRef;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Fingerprints for one aggregation pass, owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct FingerprintTable {
    records: BTreeMap<NodeRef, FingerprintRecord>,
    by_path: HashMap<String, NodeRef>,
}

impl FingerprintTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get_by_path(&self, path: &str) -> Option<&DirectoryFingerprints> {
        self.by_path
            .get(path)
            .and_then(|node| self.records.get(node))
            .map(|record| &record.fingerprints)
    }

    /// Records sorted by path.
    pub fn records(&self) -> Vec<&FingerprintRecord> {
        let mut records: Vec<&FingerprintRecord> = self.records.values().collect();
        records.sort_by(|a, b| a.path.cmp(&b.path));
        records
    }

    /// `{path: {"directory_content": ..., "directory_structure": ...}}`
    pub fn to_json(&self) -> Result<serde_json::Value, StorageError> {
        let by_path: BTreeMap<&str, &DirectoryFingerprints> = self
            .records
            .values()
            .map(|record| (record.path.as_str(), &record.fingerprints))
            .collect();
        Ok(serde_json::to_value(by_path)?)
    }

    /// Write [`Self::to_json`] to `path`, pretty-printed.
    pub fn write_json(&self, path: &Path) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&self.to_json()?)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

impl FingerprintStore for FingerprintTable {
    fn get(&self, node: NodeRef) -> Result<Option<DirectoryFingerprints>, StorageError> {
        Ok(self.records.get(&node).map(|record| record.fingerprints))
    }

    fn put(
        &mut self,
        node: NodeRef,
        path: &str,
        fingerprints: DirectoryFingerprints,
    ) -> Result<(), StorageError> {
        if let Some(previous) = self.records.get(&node) {
            if previous.path != path {
                self.by_path.remove(&previous.path);
            }
        }
        self.by_path.insert(path.to_string(), node);
        self.records.insert(
            node,
            FingerprintRecord {
                node,
                path: path.to_string(),
                fingerprints,
            },
        );
        Ok(())
    }
}
