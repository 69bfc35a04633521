//! Error types for source acquisition.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for acquisition operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while resolving a source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Local source directory not found: {0}")]
    LocalNotFound(PathBuf),

    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Failed to create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("Failed to remove scratch directory {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
