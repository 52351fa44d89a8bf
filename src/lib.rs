//! Treeprint: Similarity-Preserving Directory Fingerprints
//!
//! Fingerprints directories of a codebase so near-duplicate packages can be found
//! without byte-exact matches. Each directory with two or more files gets a
//! content fingerprint (over file checksums) and a structure fingerprint (over
//! relative paths and bucketed sizes), each a feature count plus a 128-bit
//! bit-average halo hash.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod halohash;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use aggregate::{compute_directory_fingerprints, fingerprint_tree, AggregationReport};
pub use error::{ApiError, FormatError, HashError, StorageError};
pub use fingerprint::{digest_to_chunks, make_fingerprint, split_fingerprint, Fingerprint};
pub use halohash::BitAverageHaloHash;
pub use store::{DirectoryFingerprints, FingerprintStore, FingerprintTable};
pub use tree::{Codebase, InMemoryCodebase, Resource, ResourceKind};
