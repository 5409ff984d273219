//! Core types for treesum.
//!
//! This crate provides the data structures shared by the walkers and the
//! duplicate finder: fingerprints, per-entry results, entry metadata,
//! errors and walk configuration.

mod config;
mod entry;
mod error;
mod fingerprint;

pub use config::{WalkConfig, WalkConfigBuilder};
pub use entry::{EntryKind, EntryMeta};
pub use error::WalkError;
pub use fingerprint::{FINGERPRINT_LEN, FileResult, Fingerprint, ParseFingerprintError};
