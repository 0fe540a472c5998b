//! Scanner: walks the tree on its own thread and sends each repository root to the collector.

use crossbeam_channel::Sender;
use log::debug;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use walkdir::WalkDir;

use crate::RepoPath;
use crate::engine::tools::{clean_walk_path, is_excluded, is_git_dir, repo_root_from_git_dir};

use super::context::ScanContext;

pub fn spawn_walk_thread(
    path_tx: Sender<RepoPath>,
    done_tx: Sender<usize>,
    ctx: ScanContext,
) -> JoinHandle<usize> {
    thread::spawn(move || run_walk_loop(path_tx, done_tx, ctx))
}

/// Walk `ctx.root`, send the parent of every `.git` directory on `path_tx` without descending
/// into it, then send the emitted count on `done_tx` exactly once and drop `path_tx`.
///
/// Errors on the root itself end the walk and are recorded in `first_error`; so is any error in
/// strict mode. Other entry errors (unreadable subdirectory, symlink loop) are recorded in
/// `skipped_paths` and the walk continues. Returns the count of paths sent.
pub fn run_walk_loop(path_tx: Sender<RepoPath>, done_tx: Sender<usize>, ctx: ScanContext) -> usize {
    let mut count = 0_usize;
    let mut walker = WalkDir::new(&ctx.root)
        .follow_links(ctx.follow_links)
        .into_iter();

    while let Some(result) = walker.next() {
        if ctx.is_cancelled() {
            ctx.record_error("scan cancelled".to_string());
            break;
        }
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| ctx.root.clone());
                if err.depth() == 0 || ctx.strict {
                    ctx.record_error(format!("{}: {}", path.display(), err));
                    break;
                }
                ctx.record_skipped(path, err.to_string());
                continue;
            }
        };
        if entry.depth() > 0 && is_excluded(entry.path(), &ctx.exclude) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }
        if !is_git_dir(&entry) {
            continue;
        }
        // Nothing below a .git directory can be another repository root we report.
        walker.skip_current_dir();
        // The root is reported as given; anything below it is joined and cleaned.
        let repo = if entry.depth() == 0 {
            repo_root_from_git_dir(entry.path())
        } else {
            repo_root_from_git_dir(&clean_walk_path(entry.path()))
        };
        match repo {
            Some(repo) => {
                if path_tx.send(repo).is_err() {
                    break;
                }
                count += 1;
            }
            None => ctx.record_skipped(
                entry.into_path(),
                "path is not valid UTF-8".to_string(),
            ),
        }
    }
    debug!("walk: done, {} repositories emitted", count);
    let _ = done_tx.send(count);
    drop(path_tx);
    count
}
