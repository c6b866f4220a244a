//! Manifest store - Write the file list to disk
//!
//! The manifest is built in a temp file next to its destination and renamed
//! into place only after every line has been flushed, so a failed run never
//! leaves a truncated manifest behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::backends::walk::{list_files, resolve_root, WalkOptions};
use crate::core::error::ListError;
use crate::core::paths::resolve_output;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "train.txt";

/// Settings for one listing run
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Directory to list
    pub root: PathBuf,
    /// Manifest destination
    pub output: PathBuf,
    /// Visit entries in file-name order
    pub sort: bool,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

impl ListConfig {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            sort: false,
            follow_symlinks: false,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    /// Number of lines written
    pub files: usize,
    /// Canonical root that was walked
    pub root: PathBuf,
    /// Absolute manifest path
    pub output: PathBuf,
}

/// Walk `config.root` and replace `config.output` with the resulting manifest
pub fn write_manifest(config: &ListConfig) -> Result<ListSummary, ListError> {
    // Validate the root before touching the output
    let root = resolve_root(&config.root)?;
    let output = resolve_output(&config.output)?;
    let dir = output.parent().unwrap_or_else(|| Path::new("."));

    let output_err = |source: std::io::Error| ListError::OutputWrite {
        path: output.clone(),
        source,
    };

    let mut temp = staging_builder().tempfile_in(dir).map_err(output_err)?;
    debug!(temp = %temp.path().display(), "staging manifest");

    let options = WalkOptions {
        sort: config.sort,
        follow_symlinks: config.follow_symlinks,
        exclude: vec![output.clone(), temp.path().to_path_buf()],
    };

    let files = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let files = list_files(&root, &options, &mut writer, &output)?;
        writer.flush().map_err(output_err)?;
        files
    };
    temp.as_file().sync_all().map_err(output_err)?;

    set_manifest_permissions(&temp, &output).map_err(output_err)?;
    persist(temp, &output)?;

    debug!(files, "manifest persisted");

    Ok(ListSummary {
        files,
        root,
        output,
    })
}

/// Temp file settings; on unix the file is opened like a plain `File::create` (0666 less the umask)
fn staging_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".pathlist-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

fn persist(temp: NamedTempFile, output: &Path) -> Result<(), ListError> {
    temp.persist(output)
        .map(|_| ())
        .map_err(|e| ListError::OutputWrite {
            path: output.to_path_buf(),
            source: e.error,
        })
}

/// A replaced manifest keeps the previous file's mode
fn set_manifest_permissions(temp: &NamedTempFile, output: &Path) -> std::io::Result<()> {
    match fs::metadata(output) {
        Ok(existing) => fs::set_permissions(temp.path(), existing.permissions()),
        Err(_) => Ok(()),
    }
}
