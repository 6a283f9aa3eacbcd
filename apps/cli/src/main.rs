//! Storefront CLI: inspect menu resolution and predictive search output.
//!
//! Reads Storefront API JSON from a file or stdin and prints the resolved
//! menu tree, search view model, or navigation intent as JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
