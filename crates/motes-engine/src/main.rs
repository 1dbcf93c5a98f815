//! # Motes
//!
//! Headless driver for the Motes particle simulation.
//!
//! Loads an engine configuration (`motes.toml` or the path given on the
//! command line), spawns the configured population and ticks it at a
//! fixed rate, logging progress as it goes.
//!
//! Pass `--json-logs` to emit structured JSON log lines, or
//! `--write-config <PATH>` to dump the resolved configuration and exit.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod cli;
mod config;
mod stats;
mod timing;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Args;

/// Main entry point.
fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::from_default_env().add_directive("motes=info".parse()?);
    if args.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    info!("Motes starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = args.load_config().context("Failed to load configuration")?;

    if let Some(path) = &args.write_config {
        config
            .save_to(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(());
    }

    app::run(&config)?;

    info!("Motes shutdown complete");
    Ok(())
}
