//! CLI module - Command-line interface definition and handler

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::manifest::store::{write_manifest, ListConfig, DEFAULT_MANIFEST};

/// pathlist - write the absolute path of every file under ROOT into a manifest.
#[derive(Parser, Debug)]
#[command(name = "pathlist")]
#[command(
    author,
    version,
    about,
    long_about = r#"pathlist walks ROOT recursively and writes the absolute path of every
regular file it finds, one per line, into a manifest (default: train.txt).

The manifest is written to a temporary file next to its destination and moved
into place only when the walk completes, so a failed run never leaves a
partial manifest behind.

Examples:
    pathlist /data/test_set
    pathlist /data/test_set -o lists/train.txt --sort
    PATHLIST_ROOT=/data/test_set pathlist
"#
)]
pub struct Cli {
    /// Root directory to list.
    #[arg(
        env = "PATHLIST_ROOT",
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to list (defaults to the current directory).\n\n\
The root must exist and be a directory. Paths in the manifest are absolute and\n\
resolved through the root's canonical form."
    )]
    pub root: PathBuf,

    /// Manifest file to write.
    #[arg(
        short,
        long,
        env = "PATHLIST_OUTPUT",
        default_value = DEFAULT_MANIFEST,
        value_name = "FILE",
        long_help = "Manifest file to write. Its parent directory must already exist.\n\n\
Any previous file at this path is replaced only after a successful walk."
    )]
    pub output: PathBuf,

    /// Visit entries in file-name order.
    #[arg(
        long,
        long_help = "Visit the entries of each directory in file-name order.\n\n\
Without this flag the order is whatever the filesystem returns. With it, two runs\n\
over an unchanged tree produce byte-identical manifests."
    )]
    pub sort: bool,

    /// Descend into symlinked directories.
    #[arg(
        short = 'L',
        long,
        long_help = "Descend into directories reached through symbolic links.\n\n\
By default symlinked directories are not entered. When enabled, a symlink that\n\
points back to one of its ancestors aborts the run."
    )]
    pub follow_symlinks: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG overrides this flag."
    )]
    pub verbose: bool,
}

impl From<&Cli> for ListConfig {
    fn from(cli: &Cli) -> Self {
        ListConfig {
            sort: cli.sort,
            follow_symlinks: cli.follow_symlinks,
            ..ListConfig::new(&cli.root, &cli.output)
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = ListConfig::from(&cli);

    match write_manifest(&config) {
        Ok(summary) => {
            info!(
                files = summary.files,
                root = %summary.root.display(),
                output = %summary.output.display(),
                "manifest written"
            );
            Ok(())
        }
        Err(e) => Err(anyhow!("{}: {}", e.kind(), e)),
    }
}
