//! Configuration
//!
//! Layered configuration: built-in defaults, the global file
//! (`$XDG_CONFIG_HOME/treeprint/config.toml`), the workspace file
//! (`<workspace>/.treeprint.toml`), then `TREEPRINT__SECTION__KEY` environment
//! variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format: text or json (default: text)
    #[serde(default = "default_output_format")]
    pub format: String,
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

/// Complete treeprint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeprintConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub walk: WalkerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl TreeprintConfig {
    /// Reject values the loaders accept but the tooling cannot use.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_format("output.format", &self.output.format)
    }
}

pub(crate) fn validate_format(key: &str, format: &str) -> Result<(), ApiError> {
    if format != "text" && format != "json" {
        return Err(ApiError::ConfigError(format!(
            "Invalid {}: {} (must be 'text' or 'json')",
            key, format
        )));
    }
    Ok(())
}
