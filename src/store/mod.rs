//! Fingerprint Store
//!
//! Typed side table for directory fingerprints, keyed by node. Replaces a
//! free-form per-node attribute bag so other passes cannot collide with the
//! fingerprint keys.

pub mod table;

pub use table::FingerprintTable;

use crate::error::StorageError;
use crate::fingerprint::Fingerprint;
use crate::types::NodeRef;
use serde::{Deserialize, Serialize};

/// Both fingerprints of one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFingerprints {
    pub directory_content: Fingerprint,
    pub directory_structure: Fingerprint,
}

/// Stored fingerprints plus the directory they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    pub node: NodeRef,
    pub path: String,
    #[serde(flatten)]
    pub fingerprints: DirectoryFingerprints,
}

/// Sink the aggregator saves into.
///
/// A failing `put` aborts the pass; the error reaches the caller unchanged.
pub trait FingerprintStore {
    fn get(&self, node: NodeRef) -> Result<Option<DirectoryFingerprints>, StorageError>;

    /// Insert or overwrite the fingerprints of `node`.
    fn put(
        &mut self,
        node: NodeRef,
        path: &str,
        fingerprints: DirectoryFingerprints,
    ) -> Result<(), StorageError>;
}
