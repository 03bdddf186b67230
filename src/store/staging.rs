//! Staging Overlay
//!
//! Holds the draft record the UI edits. The draft is always an independent
//! copy: it starts as a clone of the latest commit and diverges only through
//! `edit`.

use crate::models::Record;
use serde_json::Value;
use tokio::sync::watch;

/// Editable draft of the committed record
pub struct StagingOverlay {
    draft: watch::Sender<Record>,
}

impl StagingOverlay {
    pub fn new() -> Self {
        let (draft, _) = watch::channel(Record::default());
        Self { draft }
    }

    /// Replace the draft with a copy of `record` and notify subscribers
    pub fn reset(&self, record: &Record) {
        self.draft.send_replace(record.clone());
    }

    /// Snapshot of the draft
    pub fn current(&self) -> Record {
        self.draft.borrow().clone()
    }

    /// Mutate the live draft in place and notify subscribers
    pub fn edit<F>(&self, f: F)
    where
        F: FnOnce(&mut Record),
    {
        self.draft.send_modify(f);
    }

    /// Set the value of one derived field; false if the field does not exist
    pub fn set_field_value(&self, name: &str, value: Value) -> bool {
        self.draft.send_if_modified(|draft| match draft.field_mut(name) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        })
    }

    pub fn has_fields(&self) -> bool {
        self.draft.borrow().has_fields()
    }

    /// True when the draft differs from `committed`
    pub fn differs_from(&self, committed: &Record) -> bool {
        *self.draft.borrow() != *committed
    }

    pub fn subscribe(&self) -> watch::Receiver<Record> {
        self.draft.subscribe()
    }
}

impl Default for StagingOverlay {
    fn default() -> Self {
        Self::new()
    }
}
