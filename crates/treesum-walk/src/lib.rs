//! Digest walkers for treesum.
//!
//! This crate turns a path into a [`Fingerprint`]: the SHA-1 of a regular
//! file's content, or for a directory a SHA-1 composed from its entries'
//! names and fingerprints, sorted by name so that listing order and task
//! completion order never matter.
//!
//! # Walkers
//!
//! - [`ConcurrentWalker`] walks every entry in its own Tokio task while a
//!   [`HandlePool`] keeps the number of open file handles bounded. The first
//!   error cancels the rest of the traversal.
//! - [`SequentialWalker`] is the plain depth-first version, kept as a
//!   reference for the concurrent one.
//!
//! ```rust,no_run
//! use treesum_walk::{ConcurrentWalker, Sha1Digestor};
//!
//! # async fn run() -> Result<(), treesum_walk::WalkError> {
//! let walker = ConcurrentWalker::new(Sha1Digestor::new(), 20);
//! let fingerprint = walker.walk("/path/to/tree").await?;
//! println!("{fingerprint}  /path/to/tree");
//! # Ok(())
//! # }
//! ```
//!
//! Both walkers are generic over a [`Digestor`] and a [`FileSystem`], so
//! callers can observe every digested file (the duplicate finder does) or
//! substitute the filesystem in tests.

mod concurrent;
mod digest;
mod fs;
mod pool;
mod scope;
mod sequential;

pub use concurrent::ConcurrentWalker;
pub use digest::{Digestor, Sha1Digestor};
pub use fs::{FileSystem, OsFileSystem, Reader, child_path};
pub use pool::{HandlePermit, HandlePool};
pub use scope::WalkScope;
pub use sequential::SequentialWalker;

// Re-export core types for convenience
pub use treesum_core::{
    EntryKind, EntryMeta, FileResult, Fingerprint, WalkConfig, WalkError,
};
