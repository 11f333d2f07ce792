//! Porcelain status-output parsing
//!
//! Each line of short-form status output is `<two-char code><space><path>`.
//! Codes are classified into the five statuses; anything unrecognized is
//! logged and treated as Normal, never an error.

use super::snapshot::{FileStatus, StatusSnapshot};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

static STATUS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(..) (.*)$").unwrap());

/// Two-character codes marking an unmerged entry.
const CONFLICTED: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

/// Parse porcelain output into a snapshot.
///
/// Paths are resolved to absolute form against the repository root, with
/// trailing separators stripped.
pub fn parse(repo_root: &Path, output: &str) -> StatusSnapshot {
    let mut entries = HashMap::new();

    for line in output.lines() {
        if let Some(caps) = STATUS_LINE.captures(line) {
            let code = &caps[1];
            let rel = caps[2].trim_end_matches('/');
            let path: PathBuf = repo_root.join(rel);
            entries.insert(path, classify(code));
        }
    }

    StatusSnapshot::new(entries)
}

/// Classify a two-character status code.
pub fn classify(code: &str) -> FileStatus {
    if CONFLICTED.contains(&code) {
        return FileStatus::Conflicted;
    }
    match code {
        "??" => FileStatus::Untracked,
        "!!" => FileStatus::Ignored,
        "  " => FileStatus::Normal,
        // Modified/added/deleted/renamed/copied in index or worktree.
        _ if code.len() == 2 && code.chars().all(|c| " MADRC".contains(c)) => FileStatus::Changed,
        other => {
            tracing::debug!(code = other, "unrecognized status code");
            FileStatus::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_untracked_and_ignored() {
        assert_eq!(classify("??"), FileStatus::Untracked);
        assert_eq!(classify("!!"), FileStatus::Ignored);
    }

    #[test]
    fn test_classify_conflicted() {
        for code in ["DD", "AU", "UD", "UA", "DU", "AA", "UU"] {
            assert_eq!(classify(code), FileStatus::Conflicted, "code {code}");
        }
    }

    #[test]
    fn test_classify_changed() {
        for code in [" M", "M ", "MM", "A ", " D", "R ", "C ", "AM", "RD"] {
            assert_eq!(classify(code), FileStatus::Changed, "code {code}");
        }
    }

    #[test]
    fn test_classify_blank_is_normal() {
        assert_eq!(classify("  "), FileStatus::Normal);
    }

    #[test]
    fn test_classify_unrecognized_is_normal() {
        assert_eq!(classify("X?"), FileStatus::Normal);
        assert_eq!(classify("zz"), FileStatus::Normal);
    }

    #[test]
    fn test_parse_builds_absolute_paths() {
        let output = " M src/main.rs\n?? notes.txt\n!! target/\nUU merge.rs\n";
        let snap = parse(Path::new("/repo"), output);

        assert_eq!(snap.len(), 4);
        assert_eq!(
            snap.status_of(Path::new("/repo/src/main.rs"), false),
            FileStatus::Changed
        );
        assert_eq!(
            snap.status_of(Path::new("/repo/notes.txt"), false),
            FileStatus::Untracked
        );
        assert_eq!(
            snap.status_of(Path::new("/repo/target"), false),
            FileStatus::Ignored
        );
        assert_eq!(
            snap.status_of(Path::new("/repo/merge.rs"), false),
            FileStatus::Conflicted
        );
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let snap = parse(Path::new("/repo"), "garbage\n\nM\n");
        assert!(snap.is_empty());
    }

    #[test]
    fn test_parse_bubbles_into_directories() {
        let snap = parse(Path::new("/repo"), " M a/x.txt\n?? b.txt\n");
        assert_eq!(snap.status_of(Path::new("/repo/a"), true), FileStatus::Changed);
        assert_eq!(
            snap.status_of(Path::new("/repo/b.txt"), false),
            FileStatus::Untracked
        );
    }
}
