//! Git-backed status source
//!
//! Shells out to `git` for the repository root and porcelain status. Every
//! failure path degrades to "no status information"; nothing here is fatal.

use super::porcelain;
use super::snapshot::StatusSnapshot;
use super::StatusSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Status source that invokes the `git` binary
#[derive(Debug, Default)]
pub struct GitStatusSource;

impl GitStatusSource {
    pub fn new() -> Self {
        Self
    }

    fn command(args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args);
        // Keep status invocations from taking the index lock.
        cmd.env("GIT_OPTIONAL_LOCKS", "0");
        cmd
    }

    /// Resolve the repository toplevel for `dir`, or None when `dir` is
    /// not inside a repository (or the tool misbehaves).
    async fn repository_root(dir: &Path) -> Option<PathBuf> {
        let output = Self::command(&["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            None
        } else {
            Some(PathBuf::from(root))
        }
    }
}

#[async_trait]
impl StatusSource for GitStatusSource {
    async fn is_available(&self) -> bool {
        match Self::command(&["--version"]).output().await {
            Ok(output) => output.status.success(),
            Err(err) => {
                tracing::warn!(error = %err, "git not available, status polling disabled");
                false
            }
        }
    }

    async fn is_repository(&self, dir: &Path) -> bool {
        if std::fs::metadata(dir.join(".git")).is_err() {
            return false;
        }

        match Self::command(&["status", "--porcelain"])
            .current_dir(dir)
            .output()
            .await
        {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    async fn refresh(&self, dir: &Path) -> StatusSnapshot {
        let Some(root) = Self::repository_root(dir).await else {
            tracing::debug!(dir = %dir.display(), "not a repository, returning empty status");
            return StatusSnapshot::default();
        };

        let output = match Self::command(&["status", "--porcelain", "--ignored"])
            .current_dir(dir)
            .output()
            .await
        {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::warn!(code = ?output.status.code(), "status command failed");
                return StatusSnapshot::default();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to run status command");
                return StatusSnapshot::default();
            }
        };

        porcelain::parse(&root, &String::from_utf8_lossy(&output.stdout))
    }
}
