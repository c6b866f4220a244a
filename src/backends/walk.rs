//! Directory walking backend
//!
//! Uses walkdir for depth-first traversal. Every regular file under the root
//! is reported by its absolute path; the root itself and directories never are.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::ListError;
use crate::core::paths::manifest_line;

/// Traversal options
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Visit each directory's entries in file-name order
    pub sort: bool,
    /// Descend into symlinked directories (cycles are reported as errors)
    pub follow_symlinks: bool,
    /// Absolute paths never reported
    pub exclude: Vec<PathBuf>,
}

/// Check the root and return its canonical absolute form
pub fn resolve_root(root: &Path) -> Result<PathBuf, ListError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(ListError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            })
        }
        Err(_) => {
            return Err(ListError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
    };

    if !metadata.is_dir() {
        return Err(ListError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    root.canonicalize()
        .map_err(|e| ListError::from_read(root, e))
}

/// Walk the tree under `root`, calling `visit` with the absolute path of each regular file
///
/// Returns the number of files visited. The first error aborts the walk.
pub fn walk_files<F>(root: &Path, options: &WalkOptions, mut visit: F) -> Result<usize, ListError>
where
    F: FnMut(&Path) -> Result<(), ListError>,
{
    let root = resolve_root(root)?;
    debug!(root = %root.display(), sort = options.sort, follow_symlinks = options.follow_symlinks, "walking");

    let mut walker = WalkDir::new(&root).follow_links(options.follow_symlinks);
    if options.sort {
        walker = walker.sort_by_file_name();
    }

    let mut count = 0;
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if is_dangling_link(&e) => {
                warn!(path = %e.path().unwrap_or(&root).display(), "skipping dangling symlink");
                continue;
            }
            Err(e) => return Err(walk_error(&root, e)),
        };

        // Skip the root itself
        if entry.depth() == 0 {
            continue;
        }

        if !is_regular_file(&entry)? {
            continue;
        }

        let path = entry.path();
        if options.exclude.iter().any(|p| p == path) {
            debug!(path = %path.display(), "excluded");
            continue;
        }

        visit(path)?;
        count += 1;
    }

    Ok(count)
}

/// Write one line per regular file under `root` to `writer`
///
/// `destination` names the writer's target in error messages.
pub fn list_files<W: Write>(
    root: &Path,
    options: &WalkOptions,
    writer: &mut W,
    destination: &Path,
) -> Result<usize, ListError> {
    walk_files(root, options, |path| {
        let line = manifest_line(path)?;
        writeln!(writer, "{}", line).map_err(|source| ListError::OutputWrite {
            path: destination.to_path_buf(),
            source,
        })
    })
}

/// Collect the absolute path of every regular file under `root`
#[allow(dead_code)]
pub fn collect_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, ListError> {
    let mut files = Vec::new();
    walk_files(root, options, |path| {
        files.push(path.to_path_buf());
        Ok(())
    })?;
    Ok(files)
}

/// Regular files, plus symlinks that resolve to one when links are not followed
///
/// Only a missing target is skipped; any other failure to resolve a link aborts.
fn is_regular_file(entry: &DirEntry) -> Result<bool, ListError> {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return Ok(true);
    }
    if !file_type.is_symlink() {
        return Ok(false);
    }

    match fs::metadata(entry.path()) {
        Ok(target) => Ok(target.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %entry.path().display(), "skipping dangling symlink");
            Ok(false)
        }
        Err(e) => Err(ListError::from_read(entry.path(), e)),
    }
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    let not_found = err
        .io_error()
        .map(|e| e.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false);

    not_found
        && err
            .path()
            .and_then(|p| fs::symlink_metadata(p).ok())
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
}

fn walk_error(root: &Path, err: walkdir::Error) -> ListError {
    let path = err.path().unwrap_or(root).to_path_buf();

    if let Some(ancestor) = err.loop_ancestor() {
        let message = format!("symlink cycle back to {}", ancestor.display());
        return ListError::Traversal {
            path,
            source: io::Error::new(io::ErrorKind::Other, message),
        };
    }

    match err.into_io_error() {
        Some(source) => ListError::from_read(path, source),
        None => ListError::Traversal {
            path,
            source: io::Error::new(io::ErrorKind::Other, "directory walk failed"),
        },
    }
}
