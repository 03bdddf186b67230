//! Record Store Module
//!
//! The stateful half of the crate:
//! - Commit store (committed source of truth)
//! - Staging overlay (editable draft, reset on every commit)
//! - Remote fetch cache (one shared fetch per cache generation)
//! - Save reconciler (fields back into attributes, then persist)
//! - Record manager (wires the above to the definition stream)

pub mod cache;
pub mod commit;
pub mod manager;
pub mod save;
pub mod staging;

pub use cache::{RecordCache, SharedFetch};
pub use commit::CommitStore;
pub use manager::RecordManager;
pub use save::SaveReconciler;
pub use staging::StagingOverlay;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Critical sections never panic mid-update, so a poisoned lock is still usable
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
