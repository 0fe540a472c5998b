//! Selector: load the cache, let the user pick, fall back to the current directory.

use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

use crate::cache::read_cache;
use crate::engine::chooser::Chooser;
use crate::{Opts, RepoPath, Selection};

/// Map the chooser's answer to a [`Selection`].
///
/// Only indices greater than zero count as a pick: index 0 is treated like an abort, so the
/// first cached path can never be selected here. Existing shell integrations rely on this.
pub fn resolve_selection(lines: &[RepoPath], picked: Option<usize>) -> Selection {
    match picked {
        Some(idx) if idx > 0 => lines
            .get(idx)
            .map_or(Selection::Nothing, |line| Selection::Picked(line.clone())),
        _ => Selection::Nothing,
    }
}

/// Run the chooser over `lines` (each shown as itself). Chooser errors count as no selection.
pub fn choose_line<C: Chooser + ?Sized>(lines: &[RepoPath], chooser: &mut C) -> Selection {
    let label = |i: usize| lines.get(i).cloned().unwrap_or_default();
    let picked = match chooser.choose(lines.len(), &label) {
        Ok(picked) => picked,
        Err(e) => {
            warn!("chooser failed: {:#}", e);
            None
        }
    };
    debug!("chooser returned {:?}", picked);
    resolve_selection(lines, picked)
}

/// Load `opts.cache_file`, ask `chooser` for a line, and return the line to print:
/// the picked path, or `cwd` when nothing was picked.
pub fn select_from_cache<C: Chooser + ?Sized>(
    opts: &Opts,
    chooser: &mut C,
    cwd: &Path,
) -> Result<String> {
    let cache_file = opts.cache_file()?;
    let lines = read_cache(cache_file)?;
    Ok(choose_line(&lines, chooser).into_output(cwd))
}
