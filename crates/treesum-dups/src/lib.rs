//! Duplicate content detection for treesum.
//!
//! Files are indexed while a walk digests them: wrap any [`Digestor`] in an
//! [`IndexingDigestor`] and every regular file's fingerprint, path and size
//! lands in a shared [`DuplicateIndex`]. After the walk the index is turned
//! into a [`DuplicateReport`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use treesum_dups::{DuplicateIndex, IndexingDigestor};
//! use treesum_walk::{ConcurrentWalker, Sha1Digestor};
//!
//! # async fn run() -> Result<(), treesum_walk::WalkError> {
//! let index = Arc::new(DuplicateIndex::new());
//! let digestor = IndexingDigestor::new(Sha1Digestor::new(), Arc::clone(&index));
//! ConcurrentWalker::new(digestor, 10).walk(".").await?;
//!
//! print!("{}", index.report());
//! # Ok(())
//! # }
//! ```
//!
//! [`Digestor`]: treesum_walk::Digestor

mod index;
mod report;
mod size;

pub use index::{DuplicateIndex, IndexingDigestor};
pub use report::{DuplicateGroup, DuplicateReport};
pub use size::HumanSize;
