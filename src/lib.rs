//! VCS-aware live file tree model
//!
//! Maintains an in-memory mirror of a directory subtree, merged with a
//! periodically re-fetched version-control status overlay, for an editor
//! side panel. Node identity and expansion state survive filesystem and
//! repository churn; the panel never loses user state to a refresh.
//!
//! The host editor is consumed through narrow seams only: a
//! [`workdir::WorkdirSource`] for the current root, an
//! [`actions::EditorHandle`] for open/focus delegation, and a
//! change-listener callback registered on the [`provider::SyncProvider`].

pub mod actions;
pub mod config;
pub mod ignore_rules;
pub mod logging;
pub mod provider;
pub mod session;
pub mod status;
pub mod tree;
pub mod workdir;

pub use actions::{Action, EditorHandle, SplitOrientation};
pub use config::PollConfig;
pub use ignore_rules::IgnoreFilter;
pub use provider::SyncProvider;
pub use session::{BufferId, ViewSession};
pub use status::{FileStatus, GitStatusSource, StatusSnapshot, StatusSource};
pub use tree::{FileTree, NodeId, TreeNode};
