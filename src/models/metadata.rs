//! View-field metadata
//!
//! Describes one displayable/editable field of a view. Definitions are authored
//! elsewhere and pushed to the store as an ordered list.

use serde::{Deserialize, Serialize};

/// Field type that marks a relate field
pub const RELATE_TYPE: &str = "relate";

/// Source marker for relate fields that are not stored as a flat column
pub const NON_DB_SOURCE: &str = "non-db";

/// Metadata for one view field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFieldDefinition {
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: String,

    /// Label key, resolved through the localization context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// "db" or "non-db" for relate fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Display-name sub-attribute of the related object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rname: Option<String>,

    /// Attribute holding the related record id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_name: Option<String>,

    /// Related module, for relate fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ViewFieldDefinition {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            ..Default::default()
        }
    }

    /// Relate field that is not stored as a flat attribute
    pub fn relate(name: impl Into<String>) -> Self {
        Self {
            source: Some(NON_DB_SOURCE.to_string()),
            ..Self::new(name, RELATE_TYPE)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_rname(mut self, rname: impl Into<String>) -> Self {
        self.rname = Some(rname.into());
        self
    }

    pub fn with_id_name(mut self, id_name: impl Into<String>) -> Self {
        self.id_name = Some(id_name.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }

    pub fn rname(&self) -> &str {
        self.rname.as_deref().unwrap_or_default()
    }

    pub fn id_name(&self) -> &str {
        self.id_name.as_deref().unwrap_or_default()
    }

    pub fn is_non_db_relate(&self) -> bool {
        self.field_type == RELATE_TYPE && self.source() == NON_DB_SOURCE
    }
}
