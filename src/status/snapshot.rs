use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Classification of an entry's version-control state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileStatus {
    Normal,
    Ignored,
    Changed,
    Untracked,
    Conflicted,
}

impl FileStatus {
    /// Single-character indicator for the panel gutter.
    pub fn indicator(&self) -> char {
        match self {
            FileStatus::Changed => 'M',
            FileStatus::Untracked => 'A',
            FileStatus::Conflicted => 'U',
            FileStatus::Normal | FileStatus::Ignored => ' ',
        }
    }
}

/// Immutable point-in-time status map
///
/// Maps absolute entry paths to their classification. A directory's status
/// is not stored; it is derived on demand as the highest-priority status
/// among entries under it (Conflicted > Changed > Untracked > Normal).
/// Snapshots are compared by deep equality to gate change notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: HashMap<PathBuf, FileStatus>,
}

impl StatusSnapshot {
    pub fn new(entries: HashMap<PathBuf, FileStatus>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, status)| (normalize(&path), status))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Resolve the display status for a path.
    ///
    /// Files are a direct lookup; directories aggregate over the entries
    /// they contain. Aggregation walks every entry, which is fine because
    /// it only runs for nodes the panel actually shows.
    pub fn status_of(&self, path: &Path, is_dir: bool) -> FileStatus {
        let path = normalize(path);

        if is_dir {
            for status in [
                FileStatus::Conflicted,
                FileStatus::Changed,
                FileStatus::Untracked,
            ] {
                if self.dir_contains(&path, status) {
                    return status;
                }
            }
            FileStatus::Normal
        } else {
            self.entries
                .get(&path)
                .copied()
                .unwrap_or(FileStatus::Normal)
        }
    }

    /// Whether any entry with the given status lives at or under `dir`.
    ///
    /// `Path::starts_with` compares whole components, so `/a/b` never
    /// matches entries under `/a/bc`.
    fn dir_contains(&self, dir: &Path, status: FileStatus) -> bool {
        self.entries
            .iter()
            .any(|(path, entry_status)| *entry_status == status && path.starts_with(dir))
    }
}

/// Strip trailing separators and redundant components.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}
