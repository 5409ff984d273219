//! Content and composite digest algorithms.
//!
//! A file's fingerprint is the SHA-1 of its bytes. A directory's fingerprint
//! is the SHA-1 over its entries sorted by name, each contributing
//! `name || 0x00 || fingerprint? || 0x00`. Entries without a fingerprint
//! (symlinks, devices, ...) contribute their name only.

use std::io::{ErrorKind, Read};
use std::path::Path;

use sha1::{Digest, Sha1};
use treesum_core::{EntryMeta, FileResult, Fingerprint, WalkError};

use crate::fs::Reader;

/// Separator written after each entry name and after each entry digest.
const SEPARATOR: [u8; 1] = [0];

/// A pair of digest functions used by the walkers.
pub trait Digestor: Send + Sync + 'static {
    /// Digest one non-directory entry.
    ///
    /// Returns `None` for entries that are not regular files, without
    /// calling `open`. Regular files call `open` exactly once.
    fn digest_file(
        &self,
        path: &Path,
        meta: &EntryMeta,
        open: &dyn Fn() -> Result<Reader, WalkError>,
    ) -> Result<Option<Fingerprint>, WalkError>;

    /// Combine the results of a directory's entries. `entries` may arrive in
    /// any order.
    fn digest_dir(
        &self,
        path: &Path,
        meta: &EntryMeta,
        entries: Vec<FileResult>,
    ) -> Result<Fingerprint, WalkError>;
}

/// SHA-1 implementation of [`Digestor`].
#[derive(Debug, Clone)]
pub struct Sha1Digestor {
    buffer_size: usize,
}

impl Sha1Digestor {
    pub fn new() -> Self {
        Self::with_buffer_size(64 * 1024)
    }

    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }
}

impl Default for Sha1Digestor {
    fn default() -> Self {
        Self::new()
    }
}

impl Digestor for Sha1Digestor {
    fn digest_file(
        &self,
        path: &Path,
        meta: &EntryMeta,
        open: &dyn Fn() -> Result<Reader, WalkError>,
    ) -> Result<Option<Fingerprint>, WalkError> {
        if !meta.is_regular() {
            return Ok(None);
        }

        let mut reader = open()?;
        let (fingerprint, read) = hash_stream(&mut reader, self.buffer_size)
            .map_err(|e| WalkError::read(path, e))?;
        drop(reader);

        if read != meta.len {
            return Err(WalkError::IncompleteRead {
                path: path.to_path_buf(),
                expected: meta.len,
                actual: read,
            });
        }

        Ok(Some(fingerprint))
    }

    fn digest_dir(
        &self,
        _path: &Path,
        _meta: &EntryMeta,
        mut entries: Vec<FileResult>,
    ) -> Result<Fingerprint, WalkError> {
        entries.sort_by(|a, b| a.name_bytes().cmp(b.name_bytes()));

        let mut hasher = Sha1::new();
        for entry in &entries {
            hasher.update(entry.name_bytes());
            hasher.update(SEPARATOR);
            if let Some(fingerprint) = &entry.fingerprint {
                hasher.update(fingerprint.as_bytes());
            }
            hasher.update(SEPARATOR);
        }

        Ok(Fingerprint::new(hasher.finalize().into()))
    }
}

/// Stream `reader` to the end through SHA-1, returning the digest and the
/// number of bytes consumed.
fn hash_stream(reader: &mut dyn Read, buffer_size: usize) -> std::io::Result<(Fingerprint, u64)> {
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
        total += n as u64;
    }

    Ok((Fingerprint::new(hasher.finalize().into()), total))
}
