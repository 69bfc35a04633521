//! # rolescope_source
//!
//! Resolves where declaration files are read from: either a local directory,
//! passed through as-is, or a git repository cloned into a scratch directory
//! that lives exactly as long as the returned [`AcquiredSource`].

pub mod error;
pub mod git;
pub mod source;

pub use error::{SourceError, SourceResult};
pub use git::GitCli;
pub use source::{normalize_separators, AcquiredSource, CloneOptions, SourceAcquirer, SourceSpec};
