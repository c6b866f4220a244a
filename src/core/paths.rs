//! Path resolution utilities
//!
//! Turns user-supplied paths into the absolute forms the walker and the
//! manifest writer compare against.

use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::ListError;

/// Render a path as one manifest line (without the terminator)
///
/// Manifests are UTF-8; a path that cannot be written verbatim is an error.
pub fn manifest_line(path: &Path) -> Result<&str, ListError> {
    path.to_str().ok_or_else(|| ListError::Traversal {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8"),
    })
}

/// Directory that will hold `output`; relative paths resolve against the working directory
pub fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Resolve the manifest destination to an absolute path with a canonical parent
///
/// The file itself need not exist yet, but its parent directory must.
pub fn resolve_output(output: &Path) -> Result<PathBuf, ListError> {
    let file_name = output.file_name().ok_or_else(|| ListError::OutputWrite {
        path: output.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
    })?;

    let dir = output_dir(output)
        .canonicalize()
        .map_err(|source| ListError::OutputWrite {
            path: output.to_path_buf(),
            source,
        })?;

    if !dir.is_dir() {
        return Err(ListError::OutputWrite {
            path: output.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "parent is not a directory"),
        });
    }

    Ok(dir.join(file_name))
}
