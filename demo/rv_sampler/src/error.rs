//! Error type for the sampler binary.

use randvar_core::types::{ConfigError, RvError};
use randvar_stats::StatsError;
use thiserror::Error;

/// Result alias used by every command.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors reported to the user.
#[derive(Debug, Error)]
pub enum CliError {
    /// A distribution could not be built or sampled.
    #[error("Random variable error: {0}")]
    RandomVariable(#[from] RvError),

    /// A statistic could not be computed.
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// The RNG configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configuration file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File that failed
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML.
    #[error("Configuration file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON report could not be written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command-line value is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
