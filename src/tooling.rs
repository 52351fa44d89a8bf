//! Tooling Layer
//!
//! CLI commands and their text renderings.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
