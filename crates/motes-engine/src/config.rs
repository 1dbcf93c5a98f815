//! Engine configuration.
//!
//! Canvas, population and run-length settings for the headless driver,
//! plus the particle options every spawned particle is built from.
//! Configuration can be loaded from and saved to a TOML file; particle
//! options can also come from a separate JSON document.

use motes_common::{ConfigError, Dimension, MotesResult};
use motes_kernel::ParticleOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "motes.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Canvas ===
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,

    // === Population ===
    /// Particles spawned at start
    pub particle_count: u32,
    /// Maximum live particles (0 = unlimited)
    pub particle_limit: u32,
    /// Random seed (None = random)
    pub seed: Option<u64>,

    // === Run ===
    /// Ticks to run (0 = until every particle is gone)
    pub frames: u32,
    /// Simulation rate in ticks per second
    pub target_fps: u32,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,
    /// Ticks between progress log lines (0 = only the final summary)
    pub log_interval: u32,

    // === Particles ===
    /// JSON particle options; overrides `particles` when set
    pub particles_file: Option<PathBuf>,
    /// Particle options
    pub particles: ParticleOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280.0,
            canvas_height: 720.0,

            particle_count: 100,
            particle_limit: 0,
            seed: None,

            frames: 600,
            target_fps: 60,
            realtime: false,
            log_interval: 60,

            particles_file: None,
            particles: ParticleOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Load configuration from a path the user asked for explicitly.
    ///
    /// Unlike [`Self::load_from`], a missing or malformed file is an error.
    pub fn load_required<P: AsRef<Path>>(path: P) -> MotesResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        if !self.canvas_width.is_finite() {
            self.canvas_width = 1280.0;
        }
        if !self.canvas_height.is_finite() {
            self.canvas_height = 720.0;
        }
        self.canvas_width = self.canvas_width.clamp(16.0, 16384.0);
        self.canvas_height = self.canvas_height.clamp(16.0, 16384.0);

        self.particle_count = self.particle_count.min(1_000_000);
        if self.particle_limit > 0 && self.particle_count > self.particle_limit {
            warn!(
                "particle_count {} exceeds particle_limit {}, only the newest survive",
                self.particle_count, self.particle_limit
            );
        }

        self.target_fps = self.target_fps.clamp(1, 1000);
    }

    /// Canvas size.
    #[must_use]
    pub fn canvas(&self) -> Dimension {
        Dimension::new(self.canvas_width, self.canvas_height)
    }

    /// Particle options, read from `particles_file` when one is set.
    pub fn particle_options(&self) -> MotesResult<ParticleOptions> {
        let options = match &self.particles_file {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                let options = ParticleOptions::from_json_str(&contents)?;
                info!("Loaded particle options from {}", path.display());
                options
            },
            None => self.particles.clone(),
        };
        check_options(&options)?;
        Ok(options)
    }

    /// Length of one tick in milliseconds.
    #[must_use]
    pub fn tick_ms(&self) -> f32 {
        1000.0 / self.target_fps.max(1) as f32
    }
}

/// Rejects options the simulation cannot run with.
fn check_options(options: &ParticleOptions) -> Result<(), ConfigError> {
    if options.size.value.min() < 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "size.value".to_string(),
            reason: "radius cannot be negative".to_string(),
        });
    }
    if options.opacity.value.min() < 0.0 || options.opacity.value.max() > 1.0 {
        return Err(ConfigError::InvalidValue {
            field: "opacity.value".to_string(),
            reason: "opacity must lie in [0, 1]".to_string(),
        });
    }
    Ok(())
}
