//! Shared collaborator bundle
//!
//! One set of services can back many record managers (one per entity view).

use crate::services::{Localization, Notifier, RecordFetcher, RecordPersister, TracingNotifier};
use std::sync::Arc;

/// Collaborators a record manager consumes
pub struct RecordServices {
    /// Remote read
    pub fetcher: Arc<dyn RecordFetcher>,

    /// Remote write
    pub persister: Arc<dyn RecordPersister>,

    /// Label lookup for field derivation
    pub language: Arc<dyn Localization>,

    /// User-facing notices
    pub message: Arc<dyn Notifier>,
}

impl RecordServices {
    pub fn new(
        fetcher: Arc<dyn RecordFetcher>,
        persister: Arc<dyn RecordPersister>,
        language: Arc<dyn Localization>,
        message: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            fetcher,
            persister,
            language,
            message,
        }
    }

    /// Build from one backend that both reads and writes, logging notices
    pub fn with_backend<B>(backend: Arc<B>, language: Arc<dyn Localization>) -> Self
    where
        B: RecordFetcher + RecordPersister + 'static,
    {
        Self {
            fetcher: backend.clone(),
            persister: backend,
            language,
            message: Arc::new(TracingNotifier),
        }
    }

    pub fn with_notifier(mut self, message: Arc<dyn Notifier>) -> Self {
        self.message = message;
        self
    }
}

/// Type alias for shared services
pub type SharedServices = Arc<RecordServices>;
