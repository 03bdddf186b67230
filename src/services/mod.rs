//! External collaborators
//!
//! The store talks to the outside world only through these seams:
//! - **Backend**: remote fetch and persist of records
//! - **Language**: label lookup for derived fields
//! - **Message**: fire-and-forget user notices

pub mod backend;
pub mod language;
pub mod message;

pub use backend::{FieldSelection, RawRecord, RecordFetcher, RecordPersister};
pub use language::{LanguageStrings, Localization};
pub use message::{MessageLevel, Notifier, TracingNotifier};
