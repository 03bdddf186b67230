//! Record model
//!
//! Identity and payload of one business entity instance.

use crate::models::field::{Field, FieldMap};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entity instance as seen by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Empty string means not yet assigned by the backend
    #[serde(default)]
    pub id: String,

    /// Object kind reported by the backend, may differ from `module`
    #[serde(rename = "type", default)]
    pub object_type: String,

    #[serde(default)]
    pub module: String,

    #[serde(default)]
    pub attributes: Map<String, Value>,

    /// Present only after field derivation has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldMap>,
}

impl Record {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.as_ref()?.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.as_mut()?.get_mut(name)
    }

    pub fn has_fields(&self) -> bool {
        self.fields.as_ref().is_some_and(|f| !f.is_empty())
    }
}
