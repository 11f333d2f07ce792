//! Ignore-rule filtering for the tree
//!
//! Wraps the `ignore` crate's gitignore matcher, rooted at the tree root.
//! Rules come from the `.gitignore` file at the root and are reloaded when
//! the root path changes; a missing or malformed file means nothing is
//! ignored through this mechanism.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

/// Gitignore-style exclusion filter rooted at a directory
#[derive(Debug)]
pub struct IgnoreFilter {
    root: PathBuf,
    matcher: Gitignore,
}

impl IgnoreFilter {
    /// Load rules from `root/.gitignore`.
    pub fn load(root: &Path) -> Self {
        let rules_path = root.join(".gitignore");

        if !rules_path.exists() {
            return Self::none_at(root);
        }

        let mut builder = GitignoreBuilder::new(root);
        builder.add(&rules_path);

        match builder.build() {
            Ok(matcher) => Self {
                root: root.to_path_buf(),
                matcher,
            },
            Err(err) => {
                tracing::warn!(path = %rules_path.display(), error = %err, "failed to parse ignore rules");
                Self::none_at(root)
            }
        }
    }

    /// A filter that excludes nothing.
    pub fn none() -> Self {
        Self::none_at(Path::new(""))
    }

    fn none_at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            matcher: Gitignore::empty(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a path should be excluded from presentation.
    ///
    /// Matching is evaluated on the path relative to the filter root.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.matcher.matched(relative, is_dir).is_ignore()
    }
}
