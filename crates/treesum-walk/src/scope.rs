//! Cancellation scope for one top-level traversal.

use std::sync::{Mutex, PoisonError};

use tokio_util::sync::CancellationToken;
use treesum_core::WalkError;

/// Cancellation signal plus the first error that raised it.
///
/// Every task of one `walk` call shares a scope. Tasks that observe the
/// signal return [`WalkError::Aborted`]; the top of the walk swaps that for
/// the recorded first error.
#[derive(Debug, Default)]
pub struct WalkScope {
    token: CancellationToken,
    first_error: Mutex<Option<WalkError>>,
}

impl WalkScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Record `err` if it is the first real error, then raise the signal.
    ///
    /// Returns [`WalkError::Aborted`] for the caller to propagate. Raising an
    /// already raised scope is a no-op apart from dropping `err`.
    pub fn abort(&self, err: WalkError) -> WalkError {
        if !err.is_aborted() {
            let mut slot = self.first_error.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                tracing::debug!(error = %err, "walk failed, cancelling siblings");
                *slot = Some(err);
            }
        }
        self.token.cancel();
        WalkError::Aborted
    }

    /// Resolve the error a walk reports to its caller.
    pub fn resolve(&self, err: WalkError) -> WalkError {
        if !err.is_aborted() {
            return err;
        }
        self.first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or(err)
    }
}
