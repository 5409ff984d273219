//! Shared plumbing for the `rsum` and `fdup` binaries.

pub mod cli;
pub mod logging;
