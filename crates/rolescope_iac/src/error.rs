//! Error types for the extraction module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for extraction operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that abort a scan. Malformed declarations are not errors, see
/// [`crate::ParseWarning`].
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Source directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid declaration pattern: {0}")]
    Pattern(#[from] regex::Error),
}
