//! Integration tests for directory fingerprinting

mod cli_contracts;
mod fixture_vectors;
mod fingerprint_properties;
mod tree_fingerprints;
