//! Error taxonomy for dataset loading.
//!
//! Load failures are fatal (no query can proceed without data); a missing
//! boundary feature is not (the outline overlay is simply skipped).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// Source file is absent.
    #[error("data file not found: {path}")]
    NotFound { path: PathBuf },

    /// Source file exists but could not be parsed into the expected shape.
    #[error("malformed data in {path}: {message}")]
    Format { path: PathBuf, message: String },

    /// The named country feature is missing from the geometry document.
    #[error("boundary feature '{name}' not found in geometry document")]
    BoundaryNotFound { name: String },
}

impl DataError {
    pub fn format(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        DataError::Format {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
