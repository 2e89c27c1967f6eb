//! Error types
//!
//! Asset failures are never fatal to a running session: callers that build
//! the game absorb them into degraded state and log. The typed errors exist
//! so those callers (and tests) can tell what went wrong.

use std::path::PathBuf;

/// Failure to load or interpret an asset
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("failed to decode image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("heightfield must be at least 2x2 samples, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("expected {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },

    #[error("asset not found: {path}")]
    Missing { path: String },
}

impl AssetError {
    pub fn missing<T: ToString>(path: T) -> Self {
        AssetError::Missing {
            path: path.to_string(),
        }
    }
}

/// Failure to load or validate a game configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid<T: ToString>(msg: T) -> Self {
        ConfigError::Invalid(msg.to_string())
    }
}
