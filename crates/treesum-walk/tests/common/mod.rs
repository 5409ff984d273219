//! In-memory filesystem for walker tests.
//!
//! Supports shuffled listings, injected failures, artificial latency and
//! tracking of how many handles are open at once.

#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashSet};
use std::ffi::OsString;
use std::hash::{Hash, Hasher};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use treesum_walk::{EntryKind, EntryMeta, FileSystem, Reader};

#[derive(Debug, Clone)]
enum Node {
    File { data: Vec<u8>, declared: u64 },
    Dir,
    Symlink,
    Other,
}

/// Counts open handles and remembers the peak.
#[derive(Debug, Clone, Default)]
pub struct HandleTracker {
    open: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    opened: Arc<AtomicUsize>,
}

impl HandleTracker {
    fn acquire(&self) {
        let now = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.opened.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }

    /// Handles open right now.
    pub fn open_now(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Most handles ever open at the same time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total handles ever opened.
    pub fn total(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

struct TrackedReader {
    inner: Cursor<Vec<u8>>,
    tracker: HandleTracker,
}

impl Read for TrackedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedReader {
    fn drop(&mut self) {
        self.tracker.release();
    }
}

#[derive(Debug, Default)]
pub struct MemFs {
    nodes: BTreeMap<PathBuf, Node>,
    shuffle_seed: Option<u64>,
    fail_open: HashSet<PathBuf>,
    fail_list: HashSet<PathBuf>,
    delay: Option<Duration>,
    tracker: HandleTracker,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(mut self, path: &str, node: Node) -> Self {
        let path = PathBuf::from(path);
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
        self.nodes.insert(path, node);
        self
    }

    pub fn dir(self, path: &str) -> Self {
        self.insert(path, Node::Dir)
    }

    pub fn file(self, path: &str, data: &[u8]) -> Self {
        let declared = data.len() as u64;
        self.file_with_len(path, data, declared)
    }

    /// A file whose `stat` length disagrees with its content.
    pub fn file_with_len(self, path: &str, data: &[u8], declared: u64) -> Self {
        self.insert(
            path,
            Node::File {
                data: data.to_vec(),
                declared,
            },
        )
    }

    pub fn symlink(self, path: &str) -> Self {
        self.insert(path, Node::Symlink)
    }

    pub fn other(self, path: &str) -> Self {
        self.insert(path, Node::Other)
    }

    pub fn fail_open(mut self, path: &str) -> Self {
        self.fail_open.insert(PathBuf::from(path));
        self
    }

    pub fn fail_list(mut self, path: &str) -> Self {
        self.fail_list.insert(PathBuf::from(path));
        self
    }

    /// Permute every directory listing with a seed-dependent order.
    pub fn shuffled(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Hold every handle open for `delay` before handing it out.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn tracker(&self) -> HandleTracker {
        self.tracker.clone()
    }

    fn pause(&self) {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl FileSystem for MemFs {
    fn metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        match self.nodes.get(path) {
            Some(Node::File { declared, .. }) => Ok(EntryMeta::file(*declared)),
            Some(Node::Dir) => Ok(EntryMeta::directory()),
            Some(Node::Symlink) => Ok(EntryMeta::new(EntryKind::Symlink, 9)),
            Some(Node::Other) => Ok(EntryMeta::new(EntryKind::Other, 0)),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such entry")),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        if self.fail_list.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "listing denied"));
        }
        if !matches!(self.nodes.get(path), Some(Node::Dir)) {
            return Err(io::Error::other("not a directory"));
        }

        self.tracker.acquire();
        self.pause();
        let mut names: Vec<OsString> = self
            .nodes
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
            .collect();
        self.tracker.release();

        if let Some(seed) = self.shuffle_seed {
            names.sort_by_key(|name| {
                let mut hasher = DefaultHasher::new();
                (seed, name).hash(&mut hasher);
                hasher.finish()
            });
        }
        Ok(names)
    }

    fn open(&self, path: &Path) -> io::Result<Reader> {
        if self.fail_open.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "open denied"));
        }
        let Some(Node::File { data, .. }) = self.nodes.get(path) else {
            return Err(io::Error::other("not a regular file"));
        };

        self.tracker.acquire();
        self.pause();
        Ok(Box::new(TrackedReader {
            inner: Cursor::new(data.clone()),
            tracker: self.tracker.clone(),
        }))
    }
}

/// A few levels of directories with files, a symlink and an empty dir.
pub fn sample_tree() -> MemFs {
    MemFs::new()
        .dir("root")
        .file("root/readme.md", b"# sample\n")
        .file("root/a/one.txt", b"one")
        .file("root/a/two.txt", b"two")
        .file("root/a/deep/three.txt", b"three")
        .file("root/a/deep/copy.txt", b"one")
        .file("root/b/four.bin", &[0u8, 1, 2, 3, 255])
        .symlink("root/b/link")
        .dir("root/empty")
}

/// `dirs` directories of `files_per_dir` files each under `root`.
pub fn wide_tree(dirs: usize, files_per_dir: usize) -> MemFs {
    let mut fs = MemFs::new().dir("root");
    for d in 0..dirs {
        for f in 0..files_per_dir {
            let path = format!("root/d{d}/f{f}");
            let content = format!("dir {d} file {f}");
            fs = fs.file(&path, content.as_bytes());
        }
    }
    fs
}
