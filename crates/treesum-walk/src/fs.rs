//! Filesystem access used by the walkers.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use treesum_core::EntryMeta;

/// Readable byte stream for one open file. Closing happens on drop.
pub type Reader = Box<dyn Read + Send>;

/// The filesystem operations a walk needs.
///
/// All methods are blocking; the concurrent walker calls them from the
/// blocking thread pool.
pub trait FileSystem: Send + Sync + 'static {
    /// Metadata for `path`, without following symlinks.
    fn metadata(&self, path: &Path) -> io::Result<EntryMeta>;

    /// Names of the immediate entries of a directory, in any order.
    ///
    /// Holds a directory handle only for the duration of the call.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Open a regular file for reading.
    fn open(&self, path: &Path) -> io::Result<Reader>;
}

/// The operating system's filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        fs::symlink_metadata(path).map(|m| EntryMeta::from(&m))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn open(&self, path: &Path) -> io::Result<Reader> {
        Ok(Box::new(File::open(path)?))
    }
}

/// Join a directory entry name onto its parent.
///
/// `.` components of the parent are dropped, so entries of `.` or `./sub`
/// render as `a` and `sub/a`. `..` is kept as is.
pub fn child_path(parent: &Path, name: &OsString) -> PathBuf {
    let mut path: PathBuf = parent
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    path.push(name);
    path
}
