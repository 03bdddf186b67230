//! Record Staging - per-entity record store
//!
//! Mediates between a remote persistence backend and an editable UI surface:
//! - **Commit store**: the committed source of truth, published as a stream
//! - **Staging overlay**: an independent draft the UI edits until it saves
//! - **Field derivation**: typed, metadata-driven fields rebuilt whenever the
//!   record or its view-field definitions change
//! - **Fetch cache**: at most one in-flight fetch per cache generation, shared
//!   by every caller
//!
//! Transport, authentication and rendering live outside this crate; they are
//! reached through the traits in [`services`].

pub mod config;
pub mod derivation;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{RecordManagerConfig, Settings};
pub use derivation::FieldDeriver;
pub use error::{RecordError, RecordResult};
pub use models::{Field, FieldKind, FieldMap, Record, ViewFieldDefinition};
pub use services::{
    FieldSelection, LanguageStrings, Localization, MessageLevel, Notifier, RawRecord,
    RecordFetcher, RecordPersister, TracingNotifier,
};
pub use state::{RecordServices, SharedServices};
pub use store::{CommitStore, RecordCache, RecordManager, SaveReconciler, SharedFetch, StagingOverlay};
