// Version-control status overlay
//
// A status refresh shells out to the status tool, parses its porcelain
// output into an immutable snapshot, and the tree resolves per-node
// display status against that snapshot on demand.

pub mod git;
pub mod porcelain;
pub mod snapshot;

pub use git::GitStatusSource;
pub use snapshot::{FileStatus, StatusSnapshot};

use async_trait::async_trait;
use std::path::Path;

/// Source of version-control status information
///
/// The provider is written against this seam so that another VCS (or a
/// test double) can be substituted for git.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Whether the underlying tool exists at all. Checked once per
    /// provider; a missing tool disables status polling entirely.
    async fn is_available(&self) -> bool;

    /// Cheap check that `dir` belongs to a repository.
    async fn is_repository(&self, dir: &Path) -> bool;

    /// Build a fresh snapshot for the repository containing `dir`.
    ///
    /// Never fails: any tool or parse problem degrades to an empty
    /// snapshot.
    async fn refresh(&self, dir: &Path) -> StatusSnapshot;
}
