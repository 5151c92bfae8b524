//! Error types for wg-output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing or reading pipeline output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{path}: expected header {expected:?}, found {found:?}")]
    Header {
        path:     PathBuf,
        expected: &'static [&'static str],
        found:    Vec<String>,
    },

    #[error("{path}: building {name:?} listed more than once")]
    DuplicateName { path: PathBuf, name: String },

    #[error("output already finished")]
    Finished,
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
