//! cdg: cache the git repositories under a directory tree, then fuzzy-pick one to `cd` into.

pub mod cache;
pub mod engine;
pub mod pipeline;
pub mod select;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use std::path::Path;

use engine::{Chooser, NoopRenderer};

/// Result alias used by public cdg API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Scan `opts.root_path` for repositories and replace `opts.cache_file` with them.
/// Returns the number of repositories written. No progress output, no cancellation.
pub fn build_cache(opts: &Opts) -> Result<usize> {
    pipeline::build_cache(opts, &mut NoopRenderer, None)
}

/// Load `opts.cache_file` and let `chooser` pick. Returns the line to print: the picked
/// path, or `cwd` when nothing was picked.
pub fn select_repository<C: Chooser + ?Sized>(
    opts: &Opts,
    chooser: &mut C,
    cwd: &Path,
) -> Result<String> {
    select::select_from_cache(opts, chooser, cwd)
}
