//! placepress CLI — static directory-site generator.
//!
//! Builds a complete, search- and LLM-crawler-optimized static site from a
//! catalog of business/freelancer records, then best-effort notifies
//! indexing endpoints about the published URLs.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
