//! Commit Store
//!
//! The single source of truth for one record. Every transition replaces the
//! whole value; nothing is mutated in place, so snapshots handed out earlier
//! stay valid. Each publication resets the staging overlay before committed
//! subscribers are woken.

use crate::derivation::FieldDeriver;
use crate::models::{Record, ViewFieldDefinition};
use crate::services::Localization;
use crate::store::lock;
use crate::store::staging::StagingOverlay;
use std::sync::{Arc, Mutex, RwLock, PoisonError};
use tokio::sync::watch;
use tracing::debug;

/// Committed record plus the definitions used to derive its fields
pub struct CommitStore {
    state: watch::Sender<Record>,
    staging: Arc<StagingOverlay>,
    definitions: RwLock<Arc<Vec<ViewFieldDefinition>>>,
    language: Arc<dyn Localization>,
    /// Serialises publications so they are totally ordered
    transition: Mutex<()>,
}

impl CommitStore {
    pub fn new(staging: Arc<StagingOverlay>, language: Arc<dyn Localization>) -> Self {
        let (state, _) = watch::channel(Record::default());
        staging.reset(&state.borrow());

        Self {
            state,
            staging,
            definitions: RwLock::new(Arc::new(Vec::new())),
            language,
            transition: Mutex::new(()),
        }
    }

    /// Active definition set
    pub fn definitions(&self) -> Arc<Vec<ViewFieldDefinition>> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_definitions(&self, definitions: Vec<ViewFieldDefinition>) {
        debug!(count = definitions.len(), "Replacing view field definitions");
        *self.definitions.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(definitions);
    }

    /// Derive fields when the record has a module and definitions are loaded
    ///
    /// Otherwise `fields` is left as it is.
    pub fn prepare(&self, mut record: Record) -> Record {
        let definitions = self.definitions();
        if !record.module.is_empty() && !definitions.is_empty() {
            record.fields = Some(FieldDeriver::derive(&record, &definitions, self.language.as_ref()));
        }
        record
    }

    /// Derive fields if possible and publish the result
    ///
    /// Derivation and publication happen under the transition lock, so a
    /// concurrent definition change either sees this record or re-derives it.
    pub fn init(&self, record: Record) -> Record {
        let _guard = lock(&self.transition);
        let record = self.prepare(record);
        self.publish_locked(record.clone());
        record
    }

    /// Swap in a new definition set and re-derive the committed record
    pub fn apply_definitions(&self, definitions: Vec<ViewFieldDefinition>) {
        let _guard = lock(&self.transition);
        self.set_definitions(definitions);
        let record = self.prepare(self.current());
        self.publish_locked(record);
    }

    /// Replace the committed value unconditionally
    ///
    /// Staging is reset to a copy first, then committed subscribers are
    /// notified.
    pub fn publish(&self, record: Record) {
        let _guard = lock(&self.transition);
        self.publish_locked(record);
    }

    fn publish_locked(&self, record: Record) {
        debug!(
            module = %record.module,
            id = %record.id,
            fields = record.fields.as_ref().map_or(0, |f| f.len()),
            "Publishing committed record"
        );

        self.staging.reset(&record);
        self.state.send_replace(record);
    }

    /// Snapshot of the committed record
    pub fn current(&self) -> Record {
        self.state.borrow().clone()
    }

    /// Discard staged edits by re-cloning the committed record
    pub fn reset_staging(&self) {
        let _guard = lock(&self.transition);
        self.staging.reset(&self.state.borrow());
    }

    /// True when the staged draft differs from the committed record
    pub fn staging_is_dirty(&self) -> bool {
        self.staging.differs_from(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Record> {
        self.state.subscribe()
    }

    pub fn staging(&self) -> &Arc<StagingOverlay> {
        &self.staging
    }
}
