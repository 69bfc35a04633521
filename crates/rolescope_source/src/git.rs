//! Thin wrapper over the `git` executable.

use std::path::Path;
use std::process::Command;

use tokio::process::Command as AsyncCommand;
use tracing::{debug, info};

use crate::error::{SourceError, SourceResult};

/// Git command runner.
#[derive(Debug, Default, Clone)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }

    /// Check if Git is available on the system.
    pub fn is_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Clone `url` into the existing, empty directory `dest`.
    ///
    /// Dropping the returned future kills the `git` child.
    pub async fn clone_into(
        &self,
        url: &str,
        dest: &Path,
        branch: Option<&str>,
        depth: Option<u32>,
    ) -> SourceResult<()> {
        let mut command = AsyncCommand::new("git");
        command.args(["clone", "--quiet"]).kill_on_drop(true);

        if let Some(depth) = depth {
            command.arg("--depth").arg(depth.to_string());
        }
        if let Some(branch) = branch {
            command.args(["--branch", branch]);
        }

        command
            .arg("--")
            .arg(url)
            .arg(dest)
            // never block on a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0");

        info!("Cloning {} into {}", url, dest.display());
        debug!("Running {:?}", command);

        let output = command.output().await.map_err(|e| SourceError::CloneFailed {
            url: url.to_string(),
            message: format!("failed to run git: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::CloneFailed {
                url: url.to_string(),
                message: format!("git clone exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}
