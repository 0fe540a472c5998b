use anyhow::Result;
use log::debug;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::cache::write_cache;
use crate::engine::progress::ProgressRenderer;
use crate::utils::config::SCAN_CHANNEL_CAP;
use crate::{Opts, ScanResult, pipeline};

/// Start the scanner thread. Returns receivers and handles; caller drains `path_rx` until
/// `done_rx` fires and must join `walk_handle`.
pub fn run_scan(
    root: &Path,
    opts: &Opts,
    cancel: Option<Arc<AtomicBool>>,
) -> pipeline::ScanHandles {
    let channels = pipeline::create_scan_channels(root, opts, cancel, SCAN_CHANNEL_CAP);

    let walk_handle =
        pipeline::spawn_walk_thread(channels.path_tx, channels.done_tx, channels.ctx);

    pipeline::ScanHandles {
        path_rx: channels.path_rx,
        done_rx: channels.done_rx,
        walk_handle,
        first_error: channels.first_error,
        skipped_paths: channels.skipped_paths,
    }
}

/// Scanner → channel → collector. Returns repository roots in discovery order.
/// Fails (discarding whatever was collected) if the walk hit a terminal error.
pub fn collect_repositories<R: ProgressRenderer + ?Sized>(
    opts: &Opts,
    renderer: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<ScanResult> {
    let root = opts.root_path()?;
    let pipeline::ScanHandles {
        path_rx,
        done_rx,
        walk_handle,
        first_error,
        skipped_paths,
    } = run_scan(root, opts, cancel);

    let collected = pipeline::collect_emissions(&path_rx, &done_rx, renderer);
    let path_count = walk_handle
        .join()
        .map_err(|_| anyhow::anyhow!("walk thread panicked"))?;
    let found = collected?;
    debug!(
        "main: finish signal received, {} of {} repositories collected",
        found.len(),
        path_count
    );

    pipeline::check_for_initial_error_or_skipped_paths(opts, &first_error, &skipped_paths)?;
    Ok(found)
}

/// Build the cache: scan `opts.root_path` and replace `opts.cache_file` with the result.
/// Returns the number of repositories written. Nothing is written on any error.
/// The renderer is finished either way (with 0 on failure) so no stale progress line remains.
pub fn build_cache<R: ProgressRenderer + ?Sized>(
    opts: &Opts,
    renderer: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<usize> {
    let cache_file = opts.cache_file()?;
    let result = collect_repositories(opts, renderer, cancel).and_then(|found| {
        write_cache(cache_file, &found)?;
        Ok(found.len())
    });
    renderer.finish(result.as_ref().map_or(0, |n| *n));
    result
}
