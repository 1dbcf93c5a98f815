//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use motes_common::MotesResult;

use crate::config::{EngineConfig, CONFIG_FILE};

/// Headless particle simulation.
#[derive(Debug, Parser)]
#[command(name = "motes")]
#[command(about = "Headless particle simulation driver", long_about = None)]
#[command(version)]
pub struct Args {
    /// Engine configuration file; `motes.toml` is used when present otherwise
    pub config: Option<PathBuf>,

    /// Emit structured JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    /// Write the resolved configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,
}

impl Args {
    /// Loads and validates the configuration the arguments point at.
    ///
    /// An explicitly given config file must exist and parse. Without one,
    /// `motes.toml` is read if present and defaults are used otherwise.
    pub fn load_config(&self) -> MotesResult<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load_required(path)?,
            None => EngineConfig::load_from(CONFIG_FILE),
        };
        config.validate();
        Ok(config)
    }
}
