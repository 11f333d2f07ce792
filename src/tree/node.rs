use std::fmt;
use std::path::{Path, PathBuf};

/// Unique identifier for a tree node
///
/// A node keeps its id for as long as its entry (same name under the same
/// parent) survives re-listings, so an id is a stable handle for UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// A file or directory entry in the tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Unique identifier
    pub id: NodeId,
    /// Leaf name of the entry
    pub name: String,
    /// Absolute path: parent path joined with `name`, fixed at creation
    pub path: PathBuf,
    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,
    /// Child node IDs, in display order; includes ignored entries
    pub children: Vec<NodeId>,
    is_dir: bool,
    expanded: bool,
}

impl TreeNode {
    /// Create a node for `name` under `parent_path`.
    ///
    /// Whether the entry is a directory is read from the filesystem once,
    /// here; a path that cannot be stat'ed is treated as a file.
    pub(crate) fn new(id: NodeId, parent: Option<NodeId>, parent_path: &Path, name: &str) -> Self {
        let path = parent_path.join(name);
        let is_dir = std::fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);

        Self {
            id,
            name: name.to_string(),
            path,
            parent,
            children: Vec::new(),
            is_dir,
            expanded: false,
        }
    }

    /// Create the root node for an absolute tree root path.
    pub(crate) fn new_root(id: NodeId, root_path: PathBuf) -> Self {
        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root_path.to_string_lossy().into_owned());
        let is_dir = std::fs::metadata(&root_path)
            .map(|m| m.is_dir())
            .unwrap_or(false);

        Self {
            id,
            name,
            path: root_path,
            parent: None,
            children: Vec::new(),
            is_dir,
            expanded: false,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir
    }

    /// Only directories can be opened (expanded)
    pub fn is_openable(&self) -> bool {
        self.is_dir
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Mark the node expanded. No filesystem access happens here; children
    /// are listed on the next `FileTree::children` call.
    pub fn open(&mut self) {
        self.expanded = true;
    }

    pub fn close(&mut self) {
        self.expanded = false;
    }

    /// Name as shown in the panel: directories carry a trailing slash.
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}
