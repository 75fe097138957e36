//! Row loading error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading a row list.
#[derive(Debug, Error)]
pub enum RowsError {
    /// The row file could not be read.
    #[error("failed to read rows {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The row data is not valid JSON.
    #[error("failed to parse rows: {0}")]
    Json(#[from] serde_json::Error),

    /// The row data is valid JSON but not an array.
    #[error("rows must be a JSON array, got {0}")]
    NotAnArray(&'static str),

    /// An element of the row array is not a JSON object.
    #[error("row {index} must be a JSON object, got {kind}")]
    NotAnObject { index: usize, kind: &'static str },
}
