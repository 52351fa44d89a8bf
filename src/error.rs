//! Error types for fingerprinting, hashing, storage, and the tooling surface.

use thiserror::Error;

/// Malformed fingerprint or digest text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("fingerprint must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid character {ch:?} at position {position} (expected lowercase hex)")]
    InvalidCharacter { ch: char, position: usize },

    #[error("digest must be 32 hex characters, got {0:?}")]
    InvalidDigest(String),

    #[error("feature count {0} does not fit the 8-digit count field")]
    CountOverflow(usize),
}

/// Bit-average halo hash construction and comparison errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("no hash function available for {0} bits")]
    UnsupportedSize(usize),

    #[error("hash sizes differ: {left} bits vs {right} bits")]
    SizeMismatch { left: usize, right: usize },
}

/// Fingerprint sink errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store rejected write for {path}: {reason}")]
    WriteRejected { path: String, reason: String },
}

/// Top-level error for tree aggregation and tooling.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Duplicate path in tree: {0}")]
    DuplicatePath(String),

    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
