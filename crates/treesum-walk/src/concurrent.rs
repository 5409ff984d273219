//! Concurrent tree walker with bounded open handles.
//!
//! Every directory entry is walked in its own task. Tasks are not limited;
//! only the file handles they open are, through a shared [`HandlePool`].
//! The first failure cancels the rest of the traversal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::task::JoinSet;
use treesum_core::{FileResult, Fingerprint, WalkConfig, WalkError};

use crate::digest::{Digestor, Sha1Digestor};
use crate::fs::{FileSystem, OsFileSystem, Reader, child_path};
use crate::pool::HandlePool;
use crate::scope::WalkScope;

/// Walker that digests directory entries in parallel.
///
/// Cloning is cheap; clones share the digestor, filesystem and pool, so the
/// open-handle bound holds across every walk started from any clone.
pub struct ConcurrentWalker<D, F = OsFileSystem> {
    shared: Arc<Shared<D, F>>,
}

struct Shared<D, F> {
    digestor: D,
    fs: F,
    pool: HandlePool,
}

impl<D, F> Clone for ConcurrentWalker<D, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<D: Digestor> ConcurrentWalker<D, OsFileSystem> {
    /// Create a walker over the OS filesystem that keeps at most
    /// `max_open_files` handles open at once.
    pub fn new(digestor: D, max_open_files: usize) -> Self {
        Self::with_filesystem(digestor, OsFileSystem, max_open_files)
    }
}

impl ConcurrentWalker<Sha1Digestor, OsFileSystem> {
    /// SHA-1 walker configured from a [`WalkConfig`].
    pub fn from_config(config: &WalkConfig) -> Self {
        Self::new(
            Sha1Digestor::with_buffer_size(config.read_buffer_size),
            config.max_open_files,
        )
    }
}

impl<D: Digestor, F: FileSystem> ConcurrentWalker<D, F> {
    pub fn with_filesystem(digestor: D, fs: F, max_open_files: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                digestor,
                fs,
                pool: HandlePool::new(max_open_files),
            }),
        }
    }

    pub fn pool(&self) -> &HandlePool {
        &self.shared.pool
    }

    /// Digest the file or directory tree at `path`.
    ///
    /// Must be called within a Tokio runtime. On failure only the first
    /// error is returned; the results of sibling work are discarded.
    pub async fn walk(&self, path: impl AsRef<Path>) -> Result<Fingerprint, WalkError> {
        let path = path.as_ref().to_path_buf();
        let scope = Arc::new(WalkScope::new());
        tracing::debug!(path = %path.display(), "walk started");

        let result = walk_entry(Arc::clone(&self.shared), Arc::clone(&scope), path.clone()).await;
        // Stragglers that still observe the token wind down on their own.
        scope.token().cancel();

        match result {
            Ok(Some(fingerprint)) => {
                tracing::debug!(path = %path.display(), %fingerprint, "walk finished");
                Ok(fingerprint)
            }
            Ok(None) => Err(WalkError::Unsupported { path }),
            Err(err) => Err(scope.resolve(err)),
        }
    }
}

/// Walk one entry: stat it, then digest it as a file or fan out over its
/// children.
fn walk_entry<D: Digestor, F: FileSystem>(
    shared: Arc<Shared<D, F>>,
    scope: Arc<WalkScope>,
    path: PathBuf,
) -> BoxFuture<'static, Result<Option<Fingerprint>, WalkError>> {
    async move {
        let meta = {
            let shared = Arc::clone(&shared);
            let path = path.clone();
            blocking(move || {
                shared
                    .fs
                    .metadata(&path)
                    .map_err(|e| WalkError::stat(&path, e))
            })
            .await?
        };

        if !meta.is_dir() {
            tracing::trace!(path = %path.display(), "digesting file");
            let permit = shared.pool.acquire(scope.token()).await?;
            return blocking(move || {
                let _permit = permit;
                let fs = &shared.fs;
                let open = || -> Result<Reader, WalkError> {
                    fs.open(&path).map_err(|e| WalkError::open(&path, e))
                };
                shared.digestor.digest_file(&path, &meta, &open)
            })
            .await;
        }

        let permit = shared.pool.acquire(scope.token()).await?;
        let names = {
            let shared = Arc::clone(&shared);
            let path = path.clone();
            blocking(move || {
                let names = shared.fs.read_dir(&path).map_err(|e| WalkError::list(&path, e));
                permit.release();
                names
            })
            .await?
        };
        tracing::trace!(path = %path.display(), entries = names.len(), "listed directory");

        let mut tasks = JoinSet::new();
        for name in names {
            let child = child_path(&path, &name);
            let shared = Arc::clone(&shared);
            let scope = Arc::clone(&scope);
            tasks.spawn(async move {
                let result = walk_entry(shared, scope, child).await;
                (name, result)
            });
        }

        let mut results = Vec::with_capacity(tasks.len());
        loop {
            let joined = tokio::select! {
                biased;
                _ = scope.token().cancelled() => {
                    tasks.detach_all();
                    return Err(WalkError::Aborted);
                }
                joined = tasks.join_next() => joined,
            };

            match joined {
                None => break,
                Some(Ok((name, Ok(fingerprint)))) => results.push(FileResult::new(name, fingerprint)),
                Some(Ok((_, Err(err)))) => {
                    tasks.detach_all();
                    return Err(scope.abort(err));
                }
                Some(Err(join_err)) => {
                    tasks.detach_all();
                    return Err(scope.abort(WalkError::task(join_err)));
                }
            }
        }

        shared.digestor.digest_dir(&path, &meta, results).map(Some)
    }
    .boxed()
}

/// Run a blocking filesystem call on the blocking thread pool.
async fn blocking<T, Op>(op: Op) -> Result<T, WalkError>
where
    T: Send + 'static,
    Op: FnOnce() -> Result<T, WalkError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(WalkError::task)?
}
