//! Remote Fetch Cache
//!
//! Wraps the remote read with request coalescing: while a cache generation is
//! alive every caller gets a clone of the same shared future, so the fetch runs
//! once and its result is replayed to everyone. Each generation is driven by
//! its own spawned task, so a fetch runs to completion even when every caller
//! has dropped its handle. Passing `use_cache = false` starts a new generation
//! for future callers; the old fetch is not cancelled.

use crate::error::{transport_error, RecordResult};
use crate::models::Record;
use crate::services::{MessageLevel, Notifier, RawRecord};
use crate::store::lock;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, warn};

/// One fetch execution, boxed so generations can be swapped freely
pub type FetchFuture = BoxFuture<'static, RecordResult<Record>>;

/// Multicast, replay-latest handle to one fetch execution
pub type SharedFetch = Shared<FetchFuture>;

struct CacheEntry {
    module: String,
    id: String,
    generation: u64,
    handle: SharedFetch,
}

/// At most one shared fetch per cache generation
pub struct RecordCache {
    slot: Mutex<Option<CacheEntry>>,
    generation: AtomicU64,
}

impl RecordCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the shared fetch of the current generation, starting one if needed
    ///
    /// `start` is only called when a new generation begins, and its future is
    /// spawned on the current tokio runtime. With `use_cache` set, the cached
    /// generation is returned even when it was started for a different
    /// `module`/`id`: the caller gets that other record's (stale) result. Pass
    /// `use_cache = false` whenever the record being shown changes.
    pub fn retrieve<F>(&self, module: &str, id: &str, use_cache: bool, start: F) -> SharedFetch
    where
        F: FnOnce() -> FetchFuture,
    {
        let mut slot = lock(&self.slot);

        if use_cache {
            if let Some(entry) = slot.as_ref() {
                if entry.module != module || entry.id != id {
                    warn!(
                        cached_module = %entry.module,
                        cached_id = %entry.id,
                        module,
                        id,
                        "Serving cached fetch for a different record"
                    );
                }
                debug!(generation = entry.generation, "Reusing shared fetch");
                return entry.handle.clone();
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, module, id, "Starting fetch generation");

        let task = tokio::spawn(start());
        let handle = async move {
            match task.await {
                Ok(result) => result,
                Err(e) => {
                    warn!(generation, "Fetch task did not complete: {}", e);
                    Err(transport_error(format!("fetch task failed: {}", e)))
                }
            }
        }
        .boxed()
        .shared();
        *slot = Some(CacheEntry {
            module: module.to_string(),
            id: id.to_string(),
            generation,
            handle: handle.clone(),
        });
        handle
    }

    /// Number of generations started so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_cached(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Drop the shared handle; the next retrieve starts a new generation
    pub fn clear(&self) {
        if lock(&self.slot).take().is_some() {
            debug!("Cleared record fetch cache");
        }
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a raw backend read onto a `Record`
///
/// No data gives an empty record. Data without an identity notifies
/// `not_found_key` and also gives an empty record.
pub fn map_fetch_response(
    module: &str,
    response: Option<RawRecord>,
    message: &dyn Notifier,
    not_found_key: &str,
) -> Record {
    let Some(raw) = response else {
        return Record::default();
    };

    let Some(id) = raw.id() else {
        debug!(module, "Fetched record has no identity");
        message.notify(MessageLevel::Danger, not_found_key);
        return Record::default();
    };

    Record {
        id,
        object_type: raw.object_name(),
        module: module.to_string(),
        attributes: raw.attributes,
        fields: None,
    }
}
