//! Fingerprint index filled during a walk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use treesum_walk::{Digestor, EntryMeta, FileResult, Fingerprint, Reader, WalkError};

use crate::report::{DuplicateGroup, DuplicateReport};

#[derive(Debug)]
struct IndexEntry {
    unit_size: u64,
    total_size: u64,
    paths: Vec<PathBuf>,
}

/// Concurrent map from fingerprint to every file seen with it.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    entries: DashMap<Fingerprint, IndexEntry>,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one digested file.
    ///
    /// A size that differs from earlier files with the same fingerprint is
    /// logged and otherwise accepted.
    pub fn record(&self, fingerprint: Fingerprint, path: &Path, size: u64) {
        self.entries
            .entry(fingerprint)
            .and_modify(|entry| {
                if entry.unit_size != size {
                    tracing::warn!(
                        "size mismatch for {} ({} vs {}), hash {}",
                        path.display(),
                        entry.unit_size,
                        size,
                        fingerprint
                    );
                }
                entry.total_size += size;
                entry.paths.push(path.to_path_buf());
            })
            .or_insert_with(|| IndexEntry {
                unit_size: size,
                total_size: size,
                paths: vec![path.to_path_buf()],
            });
    }

    /// Number of distinct fingerprints recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups of two or more files sharing a fingerprint.
    pub fn report(&self) -> DuplicateReport {
        let groups = self
            .entries
            .iter()
            .filter(|entry| entry.paths.len() > 1)
            .map(|entry| {
                DuplicateGroup::new(
                    *entry.key(),
                    entry.unit_size,
                    entry.total_size,
                    entry.paths.clone(),
                )
            })
            .collect();
        DuplicateReport::new(groups)
    }
}

/// Digestor that records every regular file into a [`DuplicateIndex`].
#[derive(Debug, Clone)]
pub struct IndexingDigestor<D> {
    inner: D,
    index: Arc<DuplicateIndex>,
}

impl<D: Digestor> IndexingDigestor<D> {
    pub fn new(inner: D, index: Arc<DuplicateIndex>) -> Self {
        Self { inner, index }
    }
}

impl<D: Digestor> Digestor for IndexingDigestor<D> {
    fn digest_file(
        &self,
        path: &Path,
        meta: &EntryMeta,
        open: &dyn Fn() -> Result<Reader, WalkError>,
    ) -> Result<Option<Fingerprint>, WalkError> {
        let fingerprint = self.inner.digest_file(path, meta, open)?;
        if let Some(fingerprint) = fingerprint {
            self.index.record(fingerprint, path, meta.len);
        }
        Ok(fingerprint)
    }

    fn digest_dir(
        &self,
        path: &Path,
        meta: &EntryMeta,
        entries: Vec<FileResult>,
    ) -> Result<Fingerprint, WalkError> {
        self.inner.digest_dir(path, meta, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(byte: u8) -> Fingerprint {
        Fingerprint::new([byte; 20])
    }

    #[test]
    fn test_record_groups_by_fingerprint() {
        let index = DuplicateIndex::new();
        index.record(fp(1), Path::new("a"), 5);
        index.record(fp(1), Path::new("b"), 5);
        index.record(fp(2), Path::new("c"), 7);

        assert_eq!(index.len(), 2);
        let report = index.report();
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].total_size, 10);
        assert_eq!(report.groups[0].unit_size, 5);
    }

    #[test]
    fn test_size_mismatch_still_joins_group() {
        let index = DuplicateIndex::new();
        index.record(fp(3), Path::new("x"), 4);
        index.record(fp(3), Path::new("y"), 6);

        let report = index.report();
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].total_size, 10);
        assert_eq!(report.groups[0].paths.len(), 2);
    }

    #[test]
    fn test_empty_index() {
        let index = DuplicateIndex::new();
        assert!(index.is_empty());
        assert!(!index.report().has_duplicates());
    }
}
