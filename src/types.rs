//! Core types shared by the hashing, tree, and storage layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the directory fingerprint digest.
pub const HALOHASH_SIZE_IN_BITS: usize = 128;

/// NodeRef: index of a resource inside a codebase arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeRef(pub usize);

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
