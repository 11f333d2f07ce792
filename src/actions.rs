//! Semantic actions on tree nodes
//!
//! The keybinding layer of the host editor maps keys to these tokens and
//! hands them to [`SyncProvider::dispatch`]. Dispatch either mutates node
//! expansion state or delegates to the host through [`EditorHandle`];
//! every delegation is fire-and-forget.

use crate::provider::SyncProvider;
use crate::tree::NodeId;
use std::path::Path;

/// Split direction for `OpenInSplit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOrientation {
    Horizontal,
    Vertical,
}

/// Action tokens understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Toggle a directory, open a file in the editor area
    Activate,
    /// Open a file in the editor area; no effect on directories
    ActivateFile,
    /// Toggle a directory; no effect on files
    ToggleDir,
    /// Open the node's path in the current editor window
    Open,
    /// Open the node's path in a new tab
    OpenInNewTab,
    /// Open the node's path in a split
    OpenInSplit(SplitOrientation),
    /// Move focus back to the editor area
    Unfocus,
    /// Show the binding summary
    Help,
}

/// Host-editor surface the dispatcher delegates to.
///
/// All calls are fire-and-forget; the host reports nothing back that the
/// tree model cares about.
pub trait EditorHandle {
    fn open_path(&self, path: &Path);
    fn open_path_in_new_tab(&self, path: &Path);
    fn open_path_in_split(&self, path: &Path, orientation: SplitOrientation);
    fn focus_editor_area(&self);
    /// Print a transient message (used for `Help`).
    fn show_message(&self, message: &str);
}

/// Binding summary shown for `Help`.
pub const HELP_TEXT: &str =
    "?: Help - (o)pen - (e)dit - (t)ab - (s)plit - (v)ertical split - ESC unfocus";

impl SyncProvider {
    /// Apply a semantic action to a node.
    ///
    /// Unknown node ids are ignored; a stale id simply means the entry
    /// disappeared between render and keypress.
    pub fn dispatch(&self, id: NodeId, action: Action, editor: &dyn EditorHandle) {
        let Some((path, is_dir)) = self.node_path(id) else {
            return;
        };

        match action {
            Action::Activate => {
                if is_dir {
                    self.toggle(id);
                } else {
                    editor.open_path(&path);
                }
            }
            Action::ActivateFile => {
                if !is_dir {
                    editor.open_path(&path);
                }
            }
            Action::ToggleDir => {
                if is_dir {
                    self.toggle(id);
                }
            }
            Action::Open => editor.open_path(&path),
            Action::OpenInNewTab => editor.open_path_in_new_tab(&path),
            Action::OpenInSplit(orientation) => editor.open_path_in_split(&path, orientation),
            Action::Unfocus => editor.focus_editor_area(),
            Action::Help => editor.show_message(HELP_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingEditor {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingEditor {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl EditorHandle for RecordingEditor {
        fn open_path(&self, path: &Path) {
            self.record(format!("open:{}", path.display()));
        }

        fn open_path_in_new_tab(&self, path: &Path) {
            self.record(format!("tab:{}", path.display()));
        }

        fn open_path_in_split(&self, path: &Path, orientation: SplitOrientation) {
            self.record(format!("split:{:?}:{}", orientation, path.display()));
        }

        fn focus_editor_area(&self) {
            self.record("focus".to_string());
        }

        fn show_message(&self, message: &str) {
            self.record(format!("message:{message}"));
        }
    }

    fn setup() -> (TempDir, SyncProvider, NodeId, NodeId, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        std_fs::create_dir(temp_dir.path().join("dir")).unwrap();
        std_fs::write(temp_dir.path().join("file.txt"), "content").unwrap();

        let provider = SyncProvider::new(temp_dir.path().to_path_buf());
        let children = provider.children(provider.root_id());
        let (dir_id, file_id) = (children[0], children[1]);
        let file_path = temp_dir.path().join("file.txt");
        (temp_dir, provider, dir_id, file_id, file_path)
    }

    #[test]
    fn test_activate_toggles_directory() {
        let (_temp_dir, provider, dir_id, _, _) = setup();
        let editor = RecordingEditor::default();

        provider.dispatch(dir_id, Action::Activate, &editor);
        assert!(provider.is_open(dir_id));
        assert!(editor.calls().is_empty());

        provider.dispatch(dir_id, Action::Activate, &editor);
        assert!(!provider.is_open(dir_id));
    }

    #[test]
    fn test_activate_opens_file() {
        let (_temp_dir, provider, _, file_id, file_path) = setup();
        let editor = RecordingEditor::default();

        provider.dispatch(file_id, Action::Activate, &editor);
        assert_eq!(editor.calls(), vec![format!("open:{}", file_path.display())]);
    }

    #[test]
    fn test_activate_file_skips_directories() {
        let (_temp_dir, provider, dir_id, _, _) = setup();
        let editor = RecordingEditor::default();

        provider.dispatch(dir_id, Action::ActivateFile, &editor);
        assert!(editor.calls().is_empty());
        assert!(!provider.is_open(dir_id));
    }

    #[test]
    fn test_toggle_dir_skips_files() {
        let (_temp_dir, provider, _, file_id, _) = setup();
        let editor = RecordingEditor::default();

        provider.dispatch(file_id, Action::ToggleDir, &editor);
        assert!(editor.calls().is_empty());
    }

    #[test]
    fn test_open_variants_delegate() {
        let (_temp_dir, provider, _, file_id, file_path) = setup();
        let editor = RecordingEditor::default();

        provider.dispatch(file_id, Action::Open, &editor);
        provider.dispatch(file_id, Action::OpenInNewTab, &editor);
        provider.dispatch(
            file_id,
            Action::OpenInSplit(SplitOrientation::Vertical),
            &editor,
        );
        provider.dispatch(file_id, Action::Unfocus, &editor);

        let path = file_path.display();
        assert_eq!(
            editor.calls(),
            vec![
                format!("open:{path}"),
                format!("tab:{path}"),
                format!("split:Vertical:{path}"),
                "focus".to_string(),
            ]
        );
    }

    #[test]
    fn test_help_shows_summary() {
        let (_temp_dir, provider, _, file_id, _) = setup();
        let editor = RecordingEditor::default();

        provider.dispatch(file_id, Action::Help, &editor);
        assert_eq!(editor.calls(), vec![format!("message:{HELP_TEXT}")]);
    }

    #[test]
    fn test_stale_id_is_ignored() {
        let (_temp_dir, provider, _, _, _) = setup();
        let editor = RecordingEditor::default();

        provider.dispatch(NodeId(9999), Action::Activate, &editor);
        assert!(editor.calls().is_empty());
    }
}
