//! Single-threaded depth-first walker.
//!
//! Produces the same fingerprints as [`ConcurrentWalker`](crate::ConcurrentWalker)
//! with at most one file open at a time. Used as a reference when checking
//! the concurrent walker.

use std::path::Path;

use treesum_core::{FileResult, Fingerprint, WalkError};

use crate::digest::Digestor;
use crate::fs::{FileSystem, OsFileSystem, Reader, child_path};

/// Depth-first walker with no pool and no cancellation.
#[derive(Debug, Clone)]
pub struct SequentialWalker<D, F = OsFileSystem> {
    digestor: D,
    fs: F,
}

impl<D: Digestor> SequentialWalker<D, OsFileSystem> {
    pub fn new(digestor: D) -> Self {
        Self::with_filesystem(digestor, OsFileSystem)
    }
}

impl<D: Digestor, F: FileSystem> SequentialWalker<D, F> {
    pub fn with_filesystem(digestor: D, fs: F) -> Self {
        Self { digestor, fs }
    }

    /// Digest the file or directory tree at `path`.
    pub fn walk(&self, path: impl AsRef<Path>) -> Result<Fingerprint, WalkError> {
        let path = path.as_ref();
        self.walk_entry(path)?
            .ok_or_else(|| WalkError::Unsupported {
                path: path.to_path_buf(),
            })
    }

    fn walk_entry(&self, path: &Path) -> Result<Option<Fingerprint>, WalkError> {
        let meta = self
            .fs
            .metadata(path)
            .map_err(|e| WalkError::stat(path, e))?;

        if !meta.is_dir() {
            let open = || -> Result<Reader, WalkError> {
                self.fs.open(path).map_err(|e| WalkError::open(path, e))
            };
            return self.digestor.digest_file(path, &meta, &open);
        }

        let names = self
            .fs
            .read_dir(path)
            .map_err(|e| WalkError::list(path, e))?;

        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let fingerprint = self.walk_entry(&child_path(path, &name))?;
            results.push(FileResult::new(name, fingerprint));
        }

        self.digestor.digest_dir(path, &meta, results).map(Some)
    }
}
