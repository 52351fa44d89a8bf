//! CLI Tooling
//!
//! Command-line interface over the fingerprinting core. Every command renders to a
//! string so the same code paths serve the binary and tests.

use crate::aggregate::{compute_directory_fingerprints, AggregationReport};
use crate::config::{validate_format, ConfigLoader, TreeprintConfig};
use crate::error::ApiError;
use crate::fingerprint::{digest_to_chunks, split_fingerprint, Fingerprint};
use crate::halohash;
use crate::store::FingerprintTable;
use crate::tooling::format::{
    format_chunks_text, format_comparison_text, format_fingerprint_report_text,
};
use crate::tree::codebase::InMemoryCodebase;
use crate::tree::walker::{walk_directory, WalkerConfig};
use crate::types::HALOHASH_SIZE_IN_BITS;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Treeprint CLI - similarity-preserving directory fingerprints
#[derive(Parser)]
#[command(name = "treeprint")]
#[command(about = "Similarity-preserving fingerprints for directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where .treeprint.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk a directory and fingerprint every non-trivial subdirectory
    Scan {
        /// Directory to scan
        path: PathBuf,
        /// Output format (text or json); defaults to the configured format
        #[arg(long)]
        format: Option<String>,
        /// Include dot-files and dot-directories
        #[arg(long)]
        include_hidden: bool,
        /// Follow symbolic links
        #[arg(long)]
        follow_links: bool,
    },
    /// Fingerprint the resources of a scan export ({"files": [...]})
    Fingerprint {
        /// Scan export JSON file
        #[arg(long)]
        input: PathBuf,
        /// Output format (text or json); defaults to the configured format
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the feature count, digest, and digest chunks of a fingerprint
    Split {
        fingerprint: String,
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Hamming distance between two fingerprints
    Compare {
        left: String,
        right: String,
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Bit-average halo hash of the given features
    Hash {
        /// Features, hashed as UTF-8
        #[arg(required = true)]
        features: Vec<String>,
        /// Digest width in bits (32, 64, 128, 160, 256, 384, 512)
        #[arg(long, default_value_t = HALOHASH_SIZE_IN_BITS)]
        bits: usize,
    },
}

/// CLI execution context
pub struct CliContext {
    config: TreeprintConfig,
}

impl CliContext {
    /// Load configuration for `workspace`, or from `config_path` when given.
    pub fn new(workspace: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load(&workspace)?,
        };
        Ok(Self { config })
    }

    pub fn with_config(config: TreeprintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TreeprintConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Scan {
                path,
                format,
                include_hidden,
                follow_links,
            } => {
                let walk = WalkerConfig {
                    include_hidden: *include_hidden || self.config.walk.include_hidden,
                    follow_links: *follow_links || self.config.walk.follow_links,
                    max_depth: self.config.walk.max_depth,
                };
                let format = self.output_format(format.as_deref())?;
                info!(path = %path.display(), "Scanning directory");
                let codebase = walk_directory(path, &walk)?;
                let (table, report) = compute_directory_fingerprints(&codebase)?;
                render_report(&path.display().to_string(), &table, &report, &format)
            }
            Commands::Fingerprint { input, format } => {
                let format = self.output_format(format.as_deref())?;
                let codebase = load_scan(input)?;
                let (table, report) = compute_directory_fingerprints(&codebase)?;
                render_report(&input.display().to_string(), &table, &report, &format)
            }
            Commands::Split {
                fingerprint,
                format,
            } => {
                validate_format("format", format)?;
                let (count, digest) = split_fingerprint(fingerprint)?;
                let chunks = digest_to_chunks(&digest)?;
                if format == "json" {
                    let chunks: Vec<String> = chunks.iter().map(hex::encode).collect();
                    Ok(serde_json::to_string_pretty(&json!({
                        "count": count,
                        "digest": digest,
                        "chunks": chunks,
                    }))?)
                } else {
                    Ok(format_chunks_text(count, &digest, &chunks))
                }
            }
            Commands::Compare {
                left,
                right,
                format,
            } => {
                validate_format("format", format)?;
                let left: Fingerprint = left.parse()?;
                let right: Fingerprint = right.parse()?;
                let distance = left.distance(&right);
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&json!({
                        "left_count": left.count(),
                        "right_count": right.count(),
                        "distance": distance,
                    }))?)
                } else {
                    Ok(format_comparison_text(&left, &right, distance))
                }
            }
            Commands::Hash { features, bits } => Ok(halohash::hash(features, *bits)?),
        }
    }

    fn output_format(&self, requested: Option<&str>) -> Result<String, ApiError> {
        let format = requested.unwrap_or(&self.config.output.format);
        validate_format("format", format)?;
        Ok(format.to_string())
    }
}

fn load_scan(input: &Path) -> Result<InMemoryCodebase, ApiError> {
    let text = std::fs::read_to_string(input).map_err(|e| ApiError::Io {
        path: input.display().to_string(),
        source: e,
    })?;
    InMemoryCodebase::from_scan_json(&text)
}

fn render_report(
    source: &str,
    table: &FingerprintTable,
    report: &AggregationReport,
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        let output = json!({
            "source": source,
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "report": report,
            "directories": table.to_json()?,
        });
        Ok(serde_json::to_string_pretty(&output)?)
    } else {
        Ok(format_fingerprint_report_text(source, table, report))
    }
}
