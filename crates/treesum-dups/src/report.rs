//! Duplicate report assembly and text rendering.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use treesum_core::Fingerprint;

use crate::size::HumanSize;

/// Files sharing one fingerprint.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// Fingerprint shared by every file in the group.
    pub fingerprint: Fingerprint,
    /// Size of the first file recorded with this fingerprint.
    pub unit_size: u64,
    /// Sum of the sizes of every file in the group.
    pub total_size: u64,
    /// Paths sorted lexicographically.
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    pub fn new(fingerprint: Fingerprint, unit_size: u64, total_size: u64, mut paths: Vec<PathBuf>) -> Self {
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        Self {
            fingerprint,
            unit_size,
            total_size,
            paths,
        }
    }

    pub fn count(&self) -> usize {
        self.paths.len()
    }
}

/// Duplicate groups ordered by total size, largest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DuplicateReport {
    pub groups: Vec<DuplicateGroup>,
}

impl DuplicateReport {
    pub fn new(mut groups: Vec<DuplicateGroup>) -> Self {
        groups.sort_by(|a, b| {
            b.total_size
                .cmp(&a.total_size)
                .then_with(|| a.fingerprint.cmp(&b.fingerprint))
        });
        Self { groups }
    }

    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Total number of files across all groups.
    pub fn total_duplicate_files(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::count).sum()
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            writeln!(
                f,
                "Replicated contents (totals {}) at:",
                HumanSize(group.total_size)
            )?;
            for path in &group.paths {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_sorted_as_strings() {
        let group = DuplicateGroup::new(
            Fingerprint::new([0; 20]),
            1,
            3,
            vec!["a/b".into(), "a.txt".into(), "Z".into()],
        );
        let paths: Vec<_> = group.paths.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["Z", "a.txt", "a/b"]);
    }

    #[test]
    fn test_groups_sorted_by_total_size_descending() {
        let small = DuplicateGroup::new(Fingerprint::new([1; 20]), 10, 20, vec!["s1".into(), "s2".into()]);
        let large = DuplicateGroup::new(Fingerprint::new([2; 20]), 2048, 4096, vec!["l1".into(), "l2".into()]);

        let report = DuplicateReport::new(vec![small, large]);
        assert_eq!(report.groups[0].total_size, 4096);
        assert_eq!(report.groups[1].total_size, 20);
        assert_eq!(report.total_duplicate_files(), 4);
    }

    #[test]
    fn test_text_rendering() {
        let group = DuplicateGroup::new(Fingerprint::new([9; 20]), 5, 10, vec!["b".into(), "a".into()]);
        let report = DuplicateReport::new(vec![group]);

        assert_eq!(
            report.to_string(),
            "Replicated contents (totals 10B) at:\n  a\n  b\n"
        );
    }

    #[test]
    fn test_empty_report_renders_nothing() {
        assert_eq!(DuplicateReport::default().to_string(), "");
    }
}
