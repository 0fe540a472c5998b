//! Scan context and channels: shared data passed into the walk thread.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use crate::{Opts, RepoPath};

/// Shared context for the walk. Built in `run_scan` and moved into the walk thread so the walk
/// loop has root, exclude, strict, cancel and error/skip state.
pub struct ScanContext {
    pub root: PathBuf,
    pub follow_links: bool,
    pub strict: bool,
    pub exclude: Vec<String>,
    pub cancel: Option<Arc<AtomicBool>>,
    pub first_error: Arc<Mutex<Option<String>>>,
    pub skipped_paths: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl ScanContext {
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Record the error that ends the walk. Only the first one is kept.
    pub fn record_error(&self, msg: String) {
        let mut slot = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert(msg);
    }

    pub fn record_skipped(&self, path: PathBuf, msg: String) {
        self.skipped_paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path, msg));
    }
}

/// Handles returned by [`run_scan`](super::run_scan): the collector receives from `path_rx`
/// until `done_rx` fires, then joins `walk_handle`.
/// `done_rx`: receives the number of emitted paths exactly once, after the last emission.
pub struct ScanHandles {
    pub path_rx: Receiver<RepoPath>,
    pub done_rx: Receiver<usize>,
    pub walk_handle: JoinHandle<usize>,
    pub first_error: Arc<Mutex<Option<String>>>,
    pub skipped_paths: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

/// Channels and shared state for the scan. Walk thread gets path_tx, done_tx, ctx; the
/// collector gets path_rx, done_rx.
pub struct ScanChannels {
    pub path_tx: Sender<RepoPath>,
    pub path_rx: Receiver<RepoPath>,
    pub done_tx: Sender<usize>,
    pub done_rx: Receiver<usize>,
    pub first_error: Arc<Mutex<Option<String>>>,
    pub skipped_paths: Arc<Mutex<Vec<(PathBuf, String)>>>,
    pub ctx: ScanContext,
}

pub fn create_scan_channels(
    root: &Path,
    opts: &Opts,
    cancel: Option<Arc<AtomicBool>>,
    channel_cap: usize,
) -> ScanChannels {
    let (path_tx, path_rx) = bounded::<RepoPath>(channel_cap);
    let (done_tx, done_rx) = bounded::<usize>(1);
    let first_error: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let skipped_paths: Arc<Mutex<Vec<(PathBuf, String)>>> = Arc::new(Mutex::new(Vec::new()));

    let ctx = ScanContext {
        root: root.to_path_buf(),
        follow_links: opts.follow_links,
        strict: opts.strict,
        exclude: opts.exclude.clone(),
        cancel,
        first_error: Arc::clone(&first_error),
        skipped_paths: Arc::clone(&skipped_paths),
    };

    ScanChannels {
        path_tx,
        path_rx,
        done_tx,
        done_rx,
        first_error,
        skipped_paths,
        ctx,
    }
}
