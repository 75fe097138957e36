//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or validating a table configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but describes an unusable table.
    #[error("invalid config: {0}")]
    Invalid(String),

    /// No configuration exists for the requested table.
    #[error("no config for table {0:?}")]
    NotFound(String),
}

impl ConfigError {
    /// Creates an invalid configuration error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
