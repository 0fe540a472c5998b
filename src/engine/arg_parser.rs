use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Switch between the git repositories under a directory tree.
///
/// Without a subcommand, pick a repository from the cache and print its path
/// (use as `cd "$(cdg)"`). Run `cdg cache` first to build the cache.
#[derive(Clone, Parser)]
#[command(name = "cdg", version)]
#[command(about = "Pick a cached git repository and print its path; `cache` builds the cache.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file. Default: `.cdg.toml` in the home directory.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cache file listing repository roots, one per line.
    #[arg(long, short = 'c', global = true, env = "CDG_CACHE_FILE", value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// Verbose output. Takes an optional `=true|false` so it never consumes the subcommand name.
    #[arg(long, short = 'v', global = true, num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Scan a directory tree for git repositories and write them to the cache file.
    Cache(CacheArgs),
}

#[derive(Clone, Args)]
pub struct CacheArgs {
    /// Directory to scan. Default: current directory.
    #[arg(long, short = 'p', env = "CDG_ROOT_PATH", value_name = "DIR")]
    pub root_path: Option<PathBuf>,

    /// Follow symbolic links (loops are detected and skipped).
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Strict mode: fail on the first unreadable directory instead of skipping it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Exclude patterns (glob syntax). Can specify multiple: -e pattern1 pattern2 pattern3
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,
}
