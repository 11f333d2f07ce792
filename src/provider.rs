//! Tree/status orchestration and the background polling loop
//!
//! [`SyncProvider`] owns the tree, the ignore filter and the current
//! status snapshot. Consumers read synchronously (`children`, `status_of`,
//! `open`/`close`/`toggle`); a background tokio task polls for working-
//! directory and status changes and invokes the registered listener at
//! most once per tick.
//!
//! Sharing discipline: the poller never edits a snapshot in place. It
//! builds a complete new one and swaps the `Arc`, so a concurrent reader
//! observes either the old or the new snapshot in full.

use crate::config::PollConfig;
use crate::ignore_rules::IgnoreFilter;
use crate::status::{FileStatus, GitStatusSource, StatusSnapshot, StatusSource};
use crate::tree::{FileTree, NodeId};
use crate::workdir::{EnvWorkdir, WorkdirSource};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tokio::sync::watch;
use tokio::time::Instant;

type ChangeListener = Arc<dyn Fn() + Send + Sync + 'static>;

/// Live tree model with a version-control status overlay
pub struct SyncProvider {
    shared: Arc<Shared>,
}

struct Shared {
    tree: Mutex<FileTree>,
    ignore: Mutex<IgnoreFilter>,
    snapshot: RwLock<Arc<StatusSnapshot>>,
    listener: Mutex<Option<ChangeListener>>,
    /// Some while a polling loop is active; sending true stops it.
    cancel: Mutex<Option<watch::Sender<bool>>>,
    status_source: Arc<dyn StatusSource>,
    workdir: Arc<dyn WorkdirSource>,
    config: PollConfig,
}

impl SyncProvider {
    /// Provider rooted at `root`, backed by git and the process working
    /// directory.
    pub fn new(root: PathBuf) -> Self {
        Self::with_sources(
            root,
            PollConfig::default(),
            Arc::new(GitStatusSource::new()),
            Arc::new(EnvWorkdir),
        )
    }

    /// Provider with explicit collaborators; the seam for other VCS
    /// backends and for tests.
    pub fn with_sources(
        root: PathBuf,
        config: PollConfig,
        status_source: Arc<dyn StatusSource>,
        workdir: Arc<dyn WorkdirSource>,
    ) -> Self {
        let ignore = IgnoreFilter::load(&root);

        Self {
            shared: Arc::new(Shared {
                tree: Mutex::new(FileTree::new(root)),
                ignore: Mutex::new(ignore),
                snapshot: RwLock::new(Arc::new(StatusSnapshot::default())),
                listener: Mutex::new(None),
                cancel: Mutex::new(None),
                status_source,
                workdir,
                config,
            }),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.tree().root_id()
    }

    pub fn root_path(&self) -> PathBuf {
        self.tree().root_path().to_path_buf()
    }

    /// Direct access to the tree for rendering walks.
    ///
    /// The guard must not be held across calls back into the provider.
    pub fn tree(&self) -> MutexGuard<'_, FileTree> {
        self.shared.tree.lock().unwrap()
    }

    /// Filtered, sorted children of a directory node.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let filter = self.shared.ignore.lock().unwrap();
        self.shared.tree.lock().unwrap().children(id, &filter)
    }

    /// Leaf name, path and directory flag for display.
    pub fn node_path(&self, id: NodeId) -> Option<(PathBuf, bool)> {
        let tree = self.tree();
        tree.get(id).map(|node| (node.path.clone(), node.is_dir()))
    }

    pub fn open(&self, id: NodeId) {
        self.tree().open(id);
    }

    pub fn close(&self, id: NodeId) {
        self.tree().close(id);
    }

    pub fn toggle(&self, id: NodeId) {
        self.tree().toggle(id);
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        self.tree().get(id).map(|n| n.is_expanded()).unwrap_or(false)
    }

    /// Current snapshot; an immutable point-in-time view.
    pub fn snapshot(&self) -> Arc<StatusSnapshot> {
        Arc::clone(&self.shared.snapshot.read().unwrap())
    }

    /// Display status for a node, resolved against the current snapshot.
    pub fn status_of(&self, id: NodeId) -> FileStatus {
        let Some((path, is_dir)) = self.node_path(id) else {
            return FileStatus::Normal;
        };
        self.snapshot().status_of(&path, is_dir)
    }

    /// Register the change listener and start the polling loop if it is
    /// not already running. The callback is invoked at most once per
    /// detected change per tick. Must be called within a tokio runtime.
    pub fn listen(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.shared.listener.lock().unwrap() = Some(Arc::new(callback));

        let mut cancel = self.shared.cancel.lock().unwrap();
        if cancel.is_none() {
            let (tx, rx) = watch::channel(false);
            *cancel = Some(tx);
            tokio::spawn(poll_loop(Arc::clone(&self.shared), rx));
        }
    }

    /// Clear the listener and stop the loop. The in-flight tick, if any,
    /// runs to completion.
    pub fn unlisten(&self) {
        *self.shared.listener.lock().unwrap() = None;

        if let Some(cancel) = self.shared.cancel.lock().unwrap().take() {
            let _ = cancel.send(true);
        }
    }
}

impl Drop for SyncProvider {
    fn drop(&mut self) {
        if let Some(cancel) = self.shared.cancel.lock().unwrap().take() {
            let _ = cancel.send(true);
        }
    }
}

/// One polling loop per provider. A tick failure is logged and the loop
/// keeps going; only the cancellation token stops it.
async fn poll_loop(shared: Arc<Shared>, mut cancel: watch::Receiver<bool>) {
    let available = shared.status_source.is_available().await;
    if !available {
        tracing::info!("status tool unavailable, polling root path only");
    }

    let mut next_refresh = Instant::now();

    loop {
        tokio::select! {
            changed = cancel.changed() => {
                // Cancelled, or the provider itself is gone.
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
            _ = tokio::time::sleep(shared.config.tick()) => {
                match tick(&shared, available, next_refresh).await {
                    Ok(outcome) => {
                        next_refresh = outcome.next_refresh;
                        if outcome.changed {
                            notify(&shared);
                        }
                    }
                    Err(err) => tracing::warn!(error = %err, "poll tick failed"),
                }
            }
        }
    }

    tracing::debug!("polling loop stopped");
}

struct TickOutcome {
    changed: bool,
    next_refresh: Instant,
}

async fn tick(shared: &Shared, available: bool, next_refresh: Instant) -> Result<TickOutcome> {
    let mut changed = false;

    // Root path first: a cwd change re-roots the tree (lazily) and
    // reloads the ignore rules for the new root.
    let cwd = shared
        .workdir
        .current_dir()
        .context("working directory unavailable")?;

    let root_moved = {
        let mut tree = shared.tree.lock().unwrap();
        if tree.root_path() != cwd {
            tree.set_root_path(cwd.clone());
            true
        } else {
            false
        }
    };

    if root_moved {
        *shared.ignore.lock().unwrap() = IgnoreFilter::load(&cwd);
        changed = true;
    }

    let mut next = next_refresh;
    if available && Instant::now() >= next_refresh {
        let root = shared.tree.lock().unwrap().root_path().to_path_buf();

        if !shared.status_source.is_repository(&root).await {
            // Not a repository: long back-off, nothing to report.
            next = Instant::now() + shared.config.not_repository_backoff();
        } else {
            let fresh = shared.status_source.refresh(&root).await;
            {
                let mut slot = shared.snapshot.write().unwrap();
                if **slot != fresh {
                    *slot = Arc::new(fresh);
                    changed = true;
                }
            }
            next = Instant::now() + shared.config.refresh_interval();
        }
    }

    Ok(TickOutcome {
        changed,
        next_refresh: next,
    })
}

fn notify(shared: &Shared) {
    // Clone out of the lock so the callback can re-enter the provider.
    let listener = shared.listener.lock().unwrap().clone();
    if let Some(listener) = listener {
        listener();
    }
}
