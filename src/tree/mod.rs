// Live directory-tree model
//
// This module provides the tree structure backing the explorer panel:
// lazily-listed directories, stable node identity across re-listings,
// and per-node expansion state that survives filesystem churn.

pub mod node;
pub mod tree;

pub use node::{NodeId, TreeNode};
pub use tree::FileTree;
