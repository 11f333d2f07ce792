use super::node::{NodeId, TreeNode};
use crate::ignore_rules::IgnoreFilter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Entry names that are never listed, independent of ignore rules.
const ALWAYS_HIDDEN: [&str; 2] = [".git", ".DS_Store"];

/// Lazy file tree with identity-preserving reconciliation
///
/// The tree starts with just the root node. A directory's entries are read
/// only when `children()` is called on it, and the result is reconciled
/// against the previously known children: a surviving entry (same name,
/// same parent) keeps its node — id, expansion state and any materialized
/// subtree — while entries that disappeared are dropped together with
/// their subtrees.
#[derive(Debug)]
pub struct FileTree {
    root_path: PathBuf,
    nodes: HashMap<NodeId, TreeNode>,
    root_id: NodeId,
    next_id: usize,
}

impl FileTree {
    /// Create a tree rooted at the given path.
    ///
    /// The path is not validated here; a root that does not exist or is
    /// not readable simply yields no children.
    pub fn new(root_path: PathBuf) -> Self {
        let root_id = NodeId(0);
        let root = TreeNode::new_root(root_id, root_path.clone());

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);

        Self {
            root_path,
            nodes,
            root_id,
            next_id: 1,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(&id)
    }

    /// Number of nodes currently materialized
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Re-root the tree at a new path.
    ///
    /// The materialized subtree is dropped: its nodes were constructed
    /// under the old root and their paths no longer describe anything
    /// under the new one. Listing stays lazy; nothing is read here.
    pub fn set_root_path(&mut self, path: PathBuf) {
        if path == self.root_path {
            return;
        }

        let stale: Vec<NodeId> = self
            .nodes
            .get(&self.root_id)
            .map(|root| root.children.clone())
            .unwrap_or_default();
        for id in stale {
            self.remove_subtree(id);
        }

        let expanded = self
            .nodes
            .get(&self.root_id)
            .map(|root| root.is_expanded())
            .unwrap_or(false);

        let mut root = TreeNode::new_root(self.root_id, path.clone());
        if expanded {
            root.open();
        }
        self.nodes.insert(self.root_id, root);
        self.root_path = path;
    }

    /// List a directory node's children: filtered, sorted, identity-preserving.
    ///
    /// Reads the directory synchronously, reconciles against known children,
    /// sorts directories before files (names case-sensitive within each
    /// group), and returns the ids that pass the ignore filter. The node's
    /// own `children` keeps ignored entries too, so toggling ignore rules
    /// needs no re-listing.
    ///
    /// A file node, an unknown id, or an unreadable directory all yield an
    /// empty list.
    pub fn children(&mut self, id: NodeId, filter: &IgnoreFilter) -> Vec<NodeId> {
        let (path, previous) = match self.nodes.get(&id) {
            Some(node) if node.is_dir() => (node.path.clone(), node.children.clone()),
            _ => return Vec::new(),
        };

        let names = list_entry_names(&path);

        // Reuse survivors, create nodes for new entries.
        let mut by_name: HashMap<String, NodeId> = previous
            .iter()
            .filter_map(|child_id| {
                self.nodes
                    .get(child_id)
                    .map(|child| (child.name.clone(), *child_id))
            })
            .collect();

        let mut merged = Vec::with_capacity(names.len());
        for name in &names {
            let child_id = match by_name.remove(name) {
                Some(existing) => existing,
                None => self.add_node(Some(id), &path, name),
            };
            merged.push(child_id);
        }

        // Whatever was not matched by a current name is gone from disk.
        for (_, stale_id) in by_name {
            self.remove_subtree(stale_id);
        }

        merged.sort_by(|a, b| {
            let a = &self.nodes[a];
            let b = &self.nodes[b];
            b.is_dir()
                .cmp(&a.is_dir())
                .then_with(|| a.name.cmp(&b.name))
        });

        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = merged.clone();
        }

        merged
            .into_iter()
            .filter(|child_id| {
                let child = &self.nodes[child_id];
                !filter.is_ignored(&child.path, child.is_dir())
            })
            .collect()
    }

    /// Expand a directory node. Files and unknown ids are left alone.
    pub fn open(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.is_openable() {
                node.open();
            }
        }
    }

    /// Collapse a node. The materialized subtree is kept so re-opening is
    /// instant and preserves deeper expansion state.
    pub fn close(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.close();
        }
    }

    /// Toggle expansion for a directory node.
    pub fn toggle(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.is_openable() {
                if node.is_expanded() {
                    node.close();
                } else {
                    node.open();
                }
            }
        }
    }

    fn add_node(&mut self, parent: Option<NodeId>, parent_path: &Path, name: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes
            .insert(id, TreeNode::new(id, parent, parent_path, name));
        id
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child_id in node.children {
                self.remove_subtree(child_id);
            }
        }
    }
}

/// List entry names in a directory, excluding always-hidden names.
///
/// Unreadable directories degrade to an empty listing.
fn list_entry_names(path: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to list directory");
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !ALWAYS_HIDDEN.contains(&name.as_str()))
        .collect()
}
