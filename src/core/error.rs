//! Error taxonomy for listing runs
//!
//! Every variant carries the path that caused the failure so the operator can
//! act on the message without re-running with extra diagnostics.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a listing run
#[derive(Debug, Error)]
pub enum ListError {
    #[error("root directory does not exist or is not a directory: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("permission denied reading {}: {source}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write manifest {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to traverse {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    /// Stable short name for the error kind, used in messages and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ListError::RootNotFound { .. } => "root-not-found",
            ListError::PermissionDenied { .. } => "permission-denied",
            ListError::OutputWrite { .. } => "output-write",
            ListError::Traversal { .. } => "traversal",
        }
    }

    /// The path the failure is attributed to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ListError::RootNotFound { path }
            | ListError::PermissionDenied { path, .. }
            | ListError::OutputWrite { path, .. }
            | ListError::Traversal { path, .. } => path,
        }
    }

    /// Classify an I/O failure on `path` met while reading the tree
    pub fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => ListError::PermissionDenied { path, source },
            _ => ListError::Traversal { path, source },
        }
    }
}
