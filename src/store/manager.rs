//! Record Manager
//!
//! Public face of the store for one entity view. Composes the commit store,
//! staging overlay, fetch cache and save reconciler, and keeps the committed
//! record derived against the latest view-field definitions.

use crate::config::RecordManagerConfig;
use crate::error::RecordResult;
use crate::models::{Record, ViewFieldDefinition};
use crate::services::FieldSelection;
use crate::state::SharedServices;
use crate::store::cache::{map_fetch_response, FetchFuture, RecordCache, SharedFetch};
use crate::store::commit::CommitStore;
use crate::store::lock;
use crate::store::save::SaveReconciler;
use crate::store::staging::StagingOverlay;
use futures::{FutureExt, Stream, StreamExt};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Committed state, staging draft and remote sync for one record
pub struct RecordManager {
    store: Arc<CommitStore>,
    cache: RecordCache,
    reconciler: SaveReconciler,
    services: SharedServices,
    config: RecordManagerConfig,
    subscriptions: Mutex<Vec<JoinHandle<()>>>,
}

impl RecordManager {
    /// Create a manager driven by a stream of definition sets
    ///
    /// Must be called inside a tokio runtime: the stream is consumed by a
    /// spawned task that lives until `destroy` (or drop).
    pub fn new<S>(services: SharedServices, definitions: S, config: RecordManagerConfig) -> Self
    where
        S: Stream<Item = Vec<ViewFieldDefinition>> + Send + 'static,
    {
        let staging = Arc::new(StagingOverlay::new());
        let store = Arc::new(CommitStore::new(staging, services.language.clone()));

        let manager = Self {
            store,
            cache: RecordCache::new(),
            reconciler: SaveReconciler::new(services.persister.clone()),
            services,
            config,
            subscriptions: Mutex::new(Vec::new()),
        };
        manager.subscribe_definitions(definitions);
        manager
    }

    fn subscribe_definitions<S>(&self, definitions: S)
    where
        S: Stream<Item = Vec<ViewFieldDefinition>> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let handle = tokio::spawn(async move {
            let mut definitions = Box::pin(definitions);
            while let Some(set) = definitions.next().await {
                store.apply_definitions(set);
            }
            debug!("View field definition stream ended");
        });
        lock(&self.subscriptions).push(handle);
    }

    /// Stream of committed records
    pub fn state(&self) -> watch::Receiver<Record> {
        self.store.subscribe()
    }

    /// Stream of staging drafts
    pub fn staging(&self) -> watch::Receiver<Record> {
        self.store.staging().subscribe()
    }

    /// Commit `record`, deriving its fields when definitions are loaded
    pub fn init(&self, record: Record) {
        self.store.init(record);
    }

    /// Persist the staged draft and commit the backend's answer
    pub async fn save(&self) -> RecordResult<Record> {
        self.reconciler.save(&self.store).await
    }

    /// Discard unsaved edits
    pub fn reset_staging(&self) {
        self.store.reset_staging();
    }

    /// Snapshot of the committed record
    pub fn get_record(&self) -> Record {
        self.store.current()
    }

    /// Snapshot of the staging draft
    pub fn staged_record(&self) -> Record {
        self.store.staging().current()
    }

    /// Edit the staging draft in place
    pub fn edit_staging<F>(&self, f: F)
    where
        F: FnOnce(&mut Record),
    {
        self.store.staging().edit(f);
    }

    /// Set one staged field value; false when the field is not derived
    pub fn set_field_value(&self, name: &str, value: Value) -> bool {
        self.store.staging().set_field_value(name, value)
    }

    /// True when staging holds unsaved edits
    pub fn is_dirty(&self) -> bool {
        self.store.staging_is_dirty()
    }

    /// Fetch a record through the cache
    ///
    /// Every caller of one cache generation awaits the same fetch. On success
    /// the fetched record is committed before the result is handed out.
    pub fn retrieve_record(&self, module: &str, id: &str, use_cache: bool) -> SharedFetch {
        let fetcher = Arc::clone(&self.services.fetcher);
        let message = Arc::clone(&self.services.message);
        let store = Arc::clone(&self.store);
        let selection = FieldSelection::new(self.config.field_selection.clone());
        let not_found_key = self.config.not_found_message_key.clone();
        let owned_module = module.to_string();
        let owned_id = id.to_string();

        self.cache.retrieve(module, id, use_cache, move || -> FetchFuture {
            async move {
                let response = match fetcher.fetch(&owned_module, &owned_id, &selection).await {
                    Ok(response) => response,
                    Err(e) => {
                        warn!(module = %owned_module, id = %owned_id, code = e.code(), "Fetch failed: {}", e);
                        return Err(e);
                    }
                };

                let record = map_fetch_response(&owned_module, response, message.as_ref(), &not_found_key);
                store.init(record.clone());
                Ok(record)
            }
            .boxed()
        })
    }

    /// `retrieve_record` with the configured cache policy
    pub fn retrieve_record_default(&self, module: &str, id: &str) -> SharedFetch {
        self.retrieve_record(module, id, self.config.use_cache)
    }

    /// Release the definition subscription and the cached fetch
    ///
    /// Safe to call any number of times.
    pub fn destroy(&self) {
        let handles: Vec<_> = lock(&self.subscriptions).drain(..).collect();
        if handles.is_empty() {
            return;
        }

        for handle in handles {
            handle.abort();
        }
        self.cache.clear();
        debug!("Record manager destroyed");
    }

    pub fn has_subscriptions(&self) -> bool {
        !lock(&self.subscriptions).is_empty()
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }
}

impl Drop for RecordManager {
    fn drop(&mut self) {
        self.destroy();
    }
}
