//! Logging System
//!
//! Structured logging using the `tracing` crate with configurable level, format,
//! and destination. Library code only emits events; installing a subscriber is
//! left to the binary (or any embedding application).

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Event encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where events are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutput {
    #[serde(rename = "stdout")]
    Stdout,
    #[default]
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "file+stderr")]
    FileAndStderr,
    /// stdout and stderr
    #[serde(rename = "both")]
    Both,
}

impl LogOutput {
    fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::FileAndStderr)
    }
}

impl FromStr for LogOutput {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            "file+stderr" => Ok(LogOutput::FileAndStderr),
            "both" => Ok(LogOutput::Both),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file when output includes a file; None uses the platform state dir
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// ANSI colors for terminal output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-target levels, e.g. `treeprint::aggregate = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

/// Resolve the log file path with precedence: explicit, TREEPRINT_LOG_FILE env, default.
pub fn resolve_log_file_path(explicit: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    if let Some(p) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    match std::env::var("TREEPRINT_LOG_FILE") {
        Ok(env_path) if !env_path.is_empty() => Ok(PathBuf::from(env_path)),
        _ => default_log_file_path(),
    }
}

fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let dirs = directories::ProjectDirs::from("", "treeprint", "treeprint").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform directories for log file".to_string())
    })?;
    // state_dir is Linux-only
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Ok(dir.join("treeprint.log"))
}

/// Install the global subscriber.
///
/// Environment variables (TREEPRINT_LOG, TREEPRINT_LOG_FORMAT, TREEPRINT_LOG_OUTPUT,
/// TREEPRINT_LOG_MODULES) override `config`. Fails if a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let installed = if !config.enabled {
        Registry::default().with(EnvFilter::new("off")).try_init()
    } else {
        let filter = build_env_filter(config)?;
        let format = env_override("TREEPRINT_LOG_FORMAT")?.unwrap_or(config.format);
        let output = env_override("TREEPRINT_LOG_OUTPUT")?.unwrap_or(config.output);
        let ansi = config.color && !output.writes_file();
        let writer = build_writer(output, config.file.clone())?;

        let subscriber = Registry::default().with(filter);
        let layer = fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer);
        match format {
            LogFormat::Json => subscriber.with(layer.json()).try_init(),
            LogFormat::Text => subscriber.with(layer.with_ansi(ansi)).try_init(),
        }
    };
    installed.map_err(|e| ApiError::ConfigError(format!("Failed to install logger: {}", e)))
}

fn env_override<T: FromStr<Err = ApiError>>(var: &str) -> Result<Option<T>, ApiError> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => value.parse().map(Some),
        _ => Ok(None),
    }
}

fn build_writer(output: LogOutput, file: Option<PathBuf>) -> Result<BoxMakeWriter, ApiError> {
    Ok(match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::Both => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        LogOutput::File => BoxMakeWriter::new(Mutex::new(open_log_file(file)?)),
        LogOutput::FileAndStderr => {
            BoxMakeWriter::new(Mutex::new(open_log_file(file)?).and(std::io::stderr))
        }
    })
}

fn open_log_file(file: Option<PathBuf>) -> Result<std::fs::File, ApiError> {
    let path = resolve_log_file_path(file)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Level filter: TREEPRINT_LOG wins outright; otherwise the configured level plus
/// module directives from config and TREEPRINT_LOG_MODULES (`target=level,...`).
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env("TREEPRINT_LOG") {
        return Ok(filter);
    }
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);
    for (module, level) in &config.modules {
        filter = filter.add_directive(parse_directive(module, level)?);
    }
    if let Ok(modules) = std::env::var("TREEPRINT_LOG_MODULES") {
        for (module, level) in modules.split(',').filter_map(|spec| spec.split_once('=')) {
            filter = filter.add_directive(parse_directive(module, level)?);
        }
    }
    Ok(filter)
}

fn parse_directive(module: &str, level: &str) -> Result<Directive, ApiError> {
    format!("{}={}", module.trim(), level.trim())
        .parse()
        .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))
}
