//! Error types for the core module.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use rolescope_iac::IacError;
use rolescope_llm::LlmError;
use rolescope_source::SourceError;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Coarse classification used to pick an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    ConfigMissing,
    InvalidSource,
    CloneFailure,
    ServiceError,
    MalformedResponse,
    Timeout,
    Transport,
    Io,
}

/// Errors that can occur during a run. Every variant is fatal.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration file {path} is missing or malformed: {message}")]
    ConfigMissing { path: PathBuf, message: String },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Extraction(#[from] IacError),

    #[error(transparent)]
    Recommendation(#[from] LlmError),
}

impl CoreError {
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigMissing {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ConfigMissing { .. } => ErrorKind::ConfigMissing,
            CoreError::Source(e) => match e {
                SourceError::LocalNotFound(_) => ErrorKind::InvalidSource,
                SourceError::CloneFailed { .. } => ErrorKind::CloneFailure,
                SourceError::Scratch(_) | SourceError::Cleanup { .. } => ErrorKind::Io,
            },
            CoreError::Extraction(e) => match e {
                IacError::RootNotFound(_) => ErrorKind::InvalidSource,
                IacError::Read { .. } | IacError::Pattern(_) => ErrorKind::Io,
            },
            CoreError::Recommendation(e) => match e {
                LlmError::Service { .. } => ErrorKind::ServiceError,
                LlmError::MalformedResponse(_) => ErrorKind::MalformedResponse,
                LlmError::Timeout(_) => ErrorKind::Timeout,
                LlmError::Transport(_) => ErrorKind::Transport,
                LlmError::InvalidEndpoint { .. } => ErrorKind::ConfigMissing,
            },
        }
    }
}
