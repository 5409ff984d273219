//! Error types for walk operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can end a walk.
///
/// Any of these is fatal to the `walk` call that observes it.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Metadata for a path could not be read.
    #[error("cannot stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be opened.
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading file content failed.
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content length differs from the length reported by `stat`.
    #[error("incomplete read of {path}: expected {expected} bytes, read {actual}")]
    IncompleteRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// A directory could not be listed.
    #[error("cannot list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path is neither a regular file nor a directory.
    #[error("{path}: not a regular file or directory")]
    Unsupported { path: PathBuf },

    /// A walker task failed to run to completion.
    #[error("walk task failed: {message}")]
    Task { message: String },

    /// Walk was abandoned because another part of the traversal failed.
    #[error("aborted")]
    Aborted,
}

impl WalkError {
    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn list(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::List {
            path: path.into(),
            source,
        }
    }

    pub fn task(message: impl ToString) -> Self {
        Self::Task {
            message: message.to_string(),
        }
    }

    /// Whether this is the cooperative-cancellation error.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
