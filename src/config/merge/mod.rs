//! Config composition: defaults plus ordered sources.

pub mod merge_policy;
pub mod service;
