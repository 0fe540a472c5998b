//! Public and internal types for the cdg API and scan pipeline.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// A directory that directly contains a `.git` directory, as produced by the walk:
/// the `.git` component is trimmed and the trailing separator is kept (e.g. `/src/repo/`).
pub type RepoPath = String;

/// Repository roots in discovery order. Not sorted, not deduplicated.
pub type ScanResult = Vec<RepoPath>;

/// One event observed by the collector loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// The scanner emitted a repository root.
    Found(RepoPath),
    /// The scanner finished; carries the number of paths it emitted.
    Finished(usize),
    /// The emission channel is closed and empty; only the finish signal remains.
    Drained,
    /// The scanner went away without sending the finish signal.
    Abandoned,
}

/// What the user picked from the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Picked(RepoPath),
    Nothing,
}

impl Selection {
    /// Line to print: the picked path, or `cwd` when nothing was picked.
    pub fn into_output(self, cwd: &Path) -> String {
        match self {
            Selection::Picked(path) => path,
            Selection::Nothing => cwd.display().to_string(),
        }
    }
}

/// Options for both operations. Built once per invocation (defaults, then config file, then
/// environment and flags) and passed by reference into the scanner, collector and selector.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Directory tree to scan for repositories.
    pub root_path: PathBuf,
    /// Cache file to write (cache) or read (select). No default.
    pub cache_file: Option<PathBuf>,
    /// Follow symbolic links during the walk. Loops are detected and skipped.
    pub follow_links: bool,
    /// Strict mode: fail on the first unreadable entry instead of skipping it.
    pub strict: bool,
    /// Exclude patterns (`*` and `?`), matched against entry names and full paths.
    pub exclude: Vec<String>,
    /// Debug logging; lists skipped paths after a scan.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            cache_file: None,
            follow_links: false,
            strict: false,
            exclude: Vec::new(),
            verbose: false,
        }
    }
}

impl Opts {
    /// Cache file path, or a configuration error when absent or empty.
    pub fn cache_file(&self) -> Result<&Path> {
        match self.cache_file.as_deref() {
            Some(p) if !p.as_os_str().is_empty() => Ok(p),
            _ => Err(anyhow!("cache-file not provided")),
        }
    }

    /// Root path, or a configuration error when empty.
    pub fn root_path(&self) -> Result<&Path> {
        if self.root_path.as_os_str().is_empty() {
            return Err(anyhow!("root-path not provided"));
        }
        Ok(&self.root_path)
    }
}
