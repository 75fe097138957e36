//! CLI error types

use std::path::PathBuf;

use datatable_lib::error::{ConfigError, RowsError};
use thiserror::Error;

/// Errors that end a `datatable` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rows(#[from] RowsError),

    /// The log file could not be created.
    #[error("failed to create log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// `--table` was given but the platform has no config directory.
    #[error("cannot determine the config directory")]
    NoConfigDir,

    /// `--sort` named a column that is missing or not sortable.
    #[error("column {0:?} is not sortable")]
    NotSortable(String),
}
