//! cdg CLI: `cdg cache` builds the repository cache; `cdg` picks from it and prints the path.

use anyhow::Result;
use cdg::engine::arg_parser::Cli;
use cdg::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
