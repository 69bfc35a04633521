//! Source resolution and scratch-directory ownership.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::error::{SourceError, SourceResult};
use crate::git::GitCli;

/// Where declaration files come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "location")]
pub enum SourceSpec {
    /// A directory on the local filesystem.
    Local(PathBuf),
    /// A repository reference understood by `git clone`.
    Git(String),
}

impl SourceSpec {
    /// Build a spec from a location and a git discriminator. Local paths
    /// have their separators normalized.
    pub fn new(location: impl Into<String>, is_git: bool) -> Self {
        let location = location.into();
        if is_git {
            Self::Git(location)
        } else {
            Self::Local(PathBuf::from(normalize_separators(&location)))
        }
    }

    pub fn is_git(&self) -> bool {
        matches!(self, SourceSpec::Git(_))
    }
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Local(path) => write!(f, "{}", path.display()),
            SourceSpec::Git(url) => write!(f, "{}", url),
        }
    }
}

/// Replace Windows separators with forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Options for git sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneOptions {
    /// Branch or tag to check out.
    pub branch: Option<String>,
    /// Shallow clone depth; `None` clones full history.
    pub depth: Option<u32>,
    /// Parent for scratch directories; the system temp dir when unset.
    pub scratch_root: Option<PathBuf>,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            branch: None,
            depth: Some(1),
            scratch_root: None,
        }
    }
}

impl CloneOptions {
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_depth(mut self, depth: Option<u32>) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }
}

/// A resolved source directory.
///
/// For git sources this owns the scratch directory. Call [`release`] once
/// the files are no longer needed; dropping the handle also removes the
/// directory but swallows removal errors.
///
/// [`release`]: AcquiredSource::release
#[derive(Debug)]
pub struct AcquiredSource {
    path: PathBuf,
    scratch: Option<TempDir>,
}

impl AcquiredSource {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the directory is a scratch clone owned by this handle.
    pub fn is_scratch(&self) -> bool {
        self.scratch.is_some()
    }

    /// Remove the scratch directory, if any.
    pub fn release(self) -> SourceResult<()> {
        match self.scratch {
            Some(scratch) => remove_scratch(scratch),
            None => Ok(()),
        }
    }
}

fn remove_scratch(scratch: TempDir) -> SourceResult<()> {
    let path = scratch.path().to_path_buf();
    scratch
        .close()
        .map_err(|source| SourceError::Cleanup { path: path.clone(), source })?;
    debug!("Removed scratch directory {}", path.display());
    Ok(())
}

/// Resolves a [`SourceSpec`] into a readable directory.
#[derive(Debug, Clone, Default)]
pub struct SourceAcquirer {
    options: CloneOptions,
    git: GitCli,
}

impl SourceAcquirer {
    pub fn new(options: CloneOptions) -> Self {
        Self {
            options,
            git: GitCli::new(),
        }
    }

    pub fn options(&self) -> &CloneOptions {
        &self.options
    }

    /// Resolve `spec`. For git sources the scratch directory lives inside
    /// the returned future until the clone finishes, so dropping the future
    /// mid-clone kills `git` and removes the directory.
    pub async fn acquire(&self, spec: &SourceSpec) -> SourceResult<AcquiredSource> {
        match spec {
            SourceSpec::Local(path) => self.acquire_local(path),
            SourceSpec::Git(url) => self.acquire_git(url).await,
        }
    }

    fn acquire_local(&self, path: &Path) -> SourceResult<AcquiredSource> {
        if !path.is_dir() {
            return Err(SourceError::LocalNotFound(path.to_path_buf()));
        }

        info!("Using local source {}", path.display());
        Ok(AcquiredSource {
            path: path.to_path_buf(),
            scratch: None,
        })
    }

    async fn acquire_git(&self, url: &str) -> SourceResult<AcquiredSource> {
        let scratch = match &self.options.scratch_root {
            Some(root) => tempfile::Builder::new().prefix("rolescope-").tempdir_in(root),
            None => tempfile::Builder::new().prefix("rolescope-").tempdir(),
        }
        .map_err(SourceError::Scratch)?;

        let cloned = self
            .git
            .clone_into(
                url,
                scratch.path(),
                self.options.branch.as_deref(),
                self.options.depth,
            )
            .await;

        if let Err(e) = cloned {
            // The clone error is returned; a cleanup error is only logged.
            if let Err(cleanup) = remove_scratch(scratch) {
                warn!("{}", cleanup);
            }
            return Err(e);
        }

        Ok(AcquiredSource {
            path: scratch.path().to_path_buf(),
            scratch: Some(scratch),
        })
    }
}
