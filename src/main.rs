//! pathlist - Write a manifest of every file under a directory
//!
//! pathlist provides:
//! - Recursive traversal of a root directory
//! - One absolute path per line in a `train.txt` style manifest
//! - Atomic replacement of the manifest on success

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod manifest;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    crate::core::logging::init_logging(cli.verbose, cli.quiet)?;
    cli::run(cli)
}
