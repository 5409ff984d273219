//! Filesystem entry metadata as seen by the walkers.

use std::fs::Metadata;

/// Type of a filesystem entry, resolved without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Other file types (sockets, devices, fifos, etc.).
    Other,
}

/// The subset of `stat` the walkers depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub kind: EntryKind,
    /// Declared length in bytes.
    pub len: u64,
}

impl EntryMeta {
    pub fn new(kind: EntryKind, len: u64) -> Self {
        Self { kind, len }
    }

    pub fn file(len: u64) -> Self {
        Self::new(EntryKind::File, len)
    }

    pub fn directory() -> Self {
        Self::new(EntryKind::Directory, 0)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Only regular files have content that gets hashed.
    pub fn is_regular(&self) -> bool {
        self.kind == EntryKind::File
    }
}

impl From<&Metadata> for EntryMeta {
    fn from(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        let kind = if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::Other
        };
        Self::new(kind, metadata.len())
    }
}
