//! In-memory collaborators for unit tests

use crate::error::RecordResult;
use crate::models::Record;
use crate::services::{
    FieldSelection, LanguageStrings, MessageLevel, Notifier, RawRecord, RecordFetcher,
    RecordPersister,
};
use crate::state::{RecordServices, SharedServices};
use crate::store::lock;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Scripted backend that counts its calls
pub struct MockBackend {
    fetch_calls: AtomicUsize,
    persist_calls: AtomicUsize,
    fetch_result: Mutex<RecordResult<Option<RawRecord>>>,
    /// `None` echoes the draft back without its fields
    persist_result: Mutex<Option<RecordResult<Record>>>,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
    selections: Mutex<Vec<FieldSelection>>,
    persisted: Mutex<Vec<Record>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            fetch_calls: AtomicUsize::new(0),
            persist_calls: AtomicUsize::new(0),
            fetch_result: Mutex::new(Ok(None)),
            persist_result: Mutex::new(None),
            fetch_gate: Mutex::new(None),
            selections: Mutex::new(Vec::new()),
            persisted: Mutex::new(Vec::new()),
        }
    }

    /// Answer fetches with these attributes
    pub fn respond_with(&self, attributes: Value) {
        let attributes = attributes.as_object().cloned().unwrap_or_default();
        *lock(&self.fetch_result) = Ok(Some(RawRecord::new(attributes)));
    }

    pub fn respond_fetch(&self, result: RecordResult<Option<RawRecord>>) {
        *lock(&self.fetch_result) = result;
    }

    pub fn respond_persist(&self, result: RecordResult<Record>) {
        *lock(&self.persist_result) = Some(result);
    }

    /// Hold every fetch until the returned gate is notified
    pub fn gate_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *lock(&self.fetch_gate) = Some(gate.clone());
        gate
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn persist_calls(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }

    pub fn selections(&self) -> Vec<FieldSelection> {
        lock(&self.selections).clone()
    }

    pub fn persisted(&self) -> Vec<Record> {
        lock(&self.persisted).clone()
    }
}

#[async_trait]
impl RecordFetcher for MockBackend {
    async fn fetch(
        &self,
        _module: &str,
        _id: &str,
        selection: &FieldSelection,
    ) -> RecordResult<Option<RawRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.selections).push(selection.clone());

        let gate = lock(&self.fetch_gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let result = lock(&self.fetch_result).clone();
        result
    }
}

#[async_trait]
impl RecordPersister for MockBackend {
    async fn persist(&self, record: &Record) -> RecordResult<Record> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.persisted).push(record.clone());

        let scripted = lock(&self.persist_result).clone();
        match scripted {
            Some(result) => result,
            None => {
                let mut saved = record.clone();
                saved.fields = None;
                Ok(saved)
            }
        }
    }
}

/// Notifier that remembers every notice
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        lock(&self.messages).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: MessageLevel, key: &str) {
        lock(&self.messages).push((level, key.to_string()));
    }
}

pub fn services(backend: &Arc<MockBackend>, notifier: &Arc<RecordingNotifier>) -> SharedServices {
    Arc::new(
        RecordServices::with_backend(backend.clone(), Arc::new(LanguageStrings::new()))
            .with_notifier(notifier.clone()),
    )
}
