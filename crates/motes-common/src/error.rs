//! Error types for Motes.

use thiserror::Error;

/// Top-level error type for Motes operations.
#[derive(Debug, Error)]
pub enum MotesError {
    /// Canvas dimensions are unusable
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML document failed to parse
    #[error("TOML parse error: {0}")]
    Toml(String),

    /// JSON document failed to parse
    #[error("JSON parse error: {0}")]
    Json(String),

    /// A field holds a value the simulation cannot use
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<toml::de::Error> for MotesError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.into())
    }
}

impl From<serde_json::Error> for MotesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.into())
    }
}

/// Result type alias for Motes operations.
pub type MotesResult<T> = Result<T, MotesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<u32>("nope").expect_err("should fail");
        let motes: MotesError = err.into();
        assert!(matches!(motes, MotesError::Config(ConfigError::Json(_))));
    }

    #[test]
    fn test_invalid_canvas_message() {
        let err = MotesError::InvalidCanvas {
            width: -1.0,
            height: 10.0,
        };
        assert_eq!(err.to_string(), "Invalid canvas size -1x10");
    }
}
