//! CLI command handler: select by default; `cache` builds the cache.

use anyhow::Result;
use log::{debug, warn};

use crate::Opts;
use crate::engine::arg_parser::{CacheArgs, Cli, Commands};
use crate::engine::handlers::{handle_cache, handle_select};
use crate::utils::cdg_toml::{apply_file_to_opts, resolve_config};
use crate::utils::setup_logging;

/// Overwrite opts from CLI (and env, which clap folds into the same fields) where given.
fn apply_cli_to_opts(cli: &Cli, opts: &mut Opts) {
    if let Some(ref p) = cli.cache_file {
        opts.cache_file = Some(p.clone());
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(Commands::Cache(CacheArgs {
        root_path,
        follow_links,
        strict,
        exclude,
    })) = &cli.command
    {
        if let Some(p) = root_path {
            opts.root_path = p.clone();
        }
        if let Some(v) = follow_links {
            opts.follow_links = *v;
        }
        if let Some(v) = strict {
            opts.strict = *v;
        }
        if !exclude.is_empty() {
            opts.exclude = exclude.clone();
        }
    }
}

/// Defaults, then config file, then env/flags. Sets up logging once verbosity is known.
pub fn setup_opts(cli: &Cli) -> Result<Opts> {
    let (file, warning) = resolve_config(cli.config.as_deref())?;
    let mut opts = Opts::default();
    if let Some(ref file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    apply_cli_to_opts(cli, &mut opts);
    setup_logging(opts.verbose);
    if let Some(msg) = warning {
        warn!("ignoring config file {}", msg);
    }
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    Ok(opts)
}

/// Run `cache` when given, otherwise select.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli)?;
    match cli.command {
        Some(Commands::Cache(_)) => handle_cache(&opts),
        None => handle_select(&opts),
    }
}
