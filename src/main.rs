//! Coursenfo CLI: scan a course library, write NFO files, hide original-language variants.

use anyhow::Result;
use clap::Parser;
use coursenfo::engine::arg_parser::{Cli, Commands};
use coursenfo::engine::{handle_generate, handle_nomedia, handle_scan};
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Scan(common) => handle_scan(common)?,
        Commands::Generate(args) => handle_generate(args)?,
        Commands::Nomedia(common) => handle_nomedia(common)?,
    }
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
