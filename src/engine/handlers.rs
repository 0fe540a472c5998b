//! Command handlers for cache and select operations

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::Opts;
use crate::engine::chooser::TerminalChooser;
use crate::engine::progress::CounterRenderer;
use crate::pipeline::build_cache;
use crate::select::select_from_cache;

/// Handle `cache`: scan the root and rewrite the cache file. Ctrl+C stops the scan without
/// touching the cache.
pub fn handle_cache(opts: &Opts) -> Result<()> {
    let cache_file = opts.cache_file()?;
    let root = opts.root_path()?;

    let cancel_requested = Arc::new(AtomicBool::new(false));
    let cancel_requested_handler = Arc::clone(&cancel_requested);
    ctrlc::set_handler(move || {
        cancel_requested_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;

    info!("Scanning {} for git repositories", root.display());
    let mut renderer = CounterRenderer::new("Scanning");
    let written = build_cache(opts, &mut renderer, Some(cancel_requested))?;
    info!(
        "wrote {} directories to cache {}",
        written,
        cache_file.display()
    );
    Ok(())
}

/// Handle select: print exactly one line, the picked repository or the current directory.
pub fn handle_select(opts: &Opts) -> Result<()> {
    let cwd = std::env::current_dir().context("determine current directory")?;
    let mut chooser = TerminalChooser::default();
    let line = select_from_cache(opts, &mut chooser, &cwd)?;
    println!("{line}");
    Ok(())
}
