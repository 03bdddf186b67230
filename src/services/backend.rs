//! Remote record backend
//!
//! Transport is out of scope: adapters implement these traits over whatever
//! protocol the host uses and report failures as `RecordError`.

use crate::config::DEFAULT_FIELD_SELECTION;
use crate::error::RecordResult;
use crate::models::Record;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute carrying the backend identity
pub const ID_ATTRIBUTE: &str = "id";

/// Attribute carrying the backend object kind
pub const OBJECT_NAME_ATTRIBUTE: &str = "object_name";

/// Ordered list of fields requested from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub fields: Vec<String>,
}

impl FieldSelection {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_SELECTION.iter().map(|s| s.to_string()).collect())
    }
}

/// Backend-shaped read result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl RawRecord {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Backend identity, if the response carries a usable one
    pub fn id(&self) -> Option<String> {
        match self.attributes.get(ID_ATTRIBUTE)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn object_name(&self) -> String {
        self.attributes
            .get(OBJECT_NAME_ATTRIBUTE)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// Remote read of one record
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// `Ok(None)` means the backend answered with no data at all
    async fn fetch(
        &self,
        module: &str,
        id: &str,
        selection: &FieldSelection,
    ) -> RecordResult<Option<RawRecord>>;
}

/// Remote write of one record
#[async_trait]
pub trait RecordPersister: Send + Sync {
    /// Persists the draft and returns the authoritative post-write record
    async fn persist(&self, record: &Record) -> RecordResult<Record>;
}
