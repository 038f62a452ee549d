//! # Optimistic Toggle
//!
//! Notification toggles flip in the UI immediately and sync to the
//! backend afterwards. This helper makes the rollback an explicit
//! transaction: snapshot the prior state, apply the speculative state,
//! and restore the snapshot as a compensating action when the remote
//! call fails — instead of hand-rolled copy/restore at every call site.

use std::future::Future;

use tracing::debug;

/// Applies `speculative` to `state`, runs the remote effect, and rolls
/// back to the prior state if the effect fails.
///
/// Returns the remote error untouched so the caller can surface it.
pub async fn apply_optimistic<T, E, F, Fut>(
    state: &mut T,
    speculative: T,
    remote: F,
) -> Result<(), E>
where
    T: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let snapshot = std::mem::replace(state, speculative);

    match remote().await {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!("optimistic update rolled back");
            *state = snapshot;
            Err(e)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
