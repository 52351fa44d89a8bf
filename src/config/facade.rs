//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::TreeprintConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment, then validate it.
    pub fn load(workspace_root: &Path) -> Result<TreeprintConfig, ApiError> {
        let config = MergeService::load(workspace_root).map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<TreeprintConfig, ApiError> {
        let config = MergeService::load_from_file(path).map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> TreeprintConfig {
        TreeprintConfig::default()
    }
}

fn config_error(e: config::ConfigError) -> ApiError {
    ApiError::ConfigError(e.to_string())
}
