//! Treeprint CLI Binary
//!
//! Command-line interface for directory fingerprinting.

use clap::Parser;
use std::process;
use treeprint::error::ApiError;
use treeprint::logging::{init_logging, LoggingConfig};
use treeprint::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    // Create CLI context
    let context = match CliContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    // CLI flags override the configured logging section
    let logging = match logging_overrides(&cli, context.config().logging.clone()) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn logging_overrides(cli: &Cli, mut logging: LoggingConfig) -> Result<LoggingConfig, ApiError> {
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.parse()?;
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.parse()?;
    }
    if cli.log_file.is_some() {
        logging.file = cli.log_file.clone();
    }
    Ok(logging)
}
