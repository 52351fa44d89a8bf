//! Codebase Trees
//!
//! Resource nodes, the capability interface the aggregator walks, an in-memory
//! arena implementation, and a filesystem walker that builds one.

pub mod codebase;
pub mod node;
pub mod walker;

pub use codebase::{Codebase, InMemoryCodebase};
pub use node::{Resource, ResourceKind};
pub use walker::{walk_directory, WalkerConfig};
