//! Derived field models
//!
//! A `Field` is a typed view of one record attribute, produced by the field
//! derivation engine from a `ViewFieldDefinition`. Fields are never built by
//! hand; edits happen by changing `Field::value` on the staged record.

use crate::models::metadata::{ViewFieldDefinition, NON_DB_SOURCE, RELATE_TYPE};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// How a field's value maps back onto the record attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Stored flat under `attributes[name]`
    Plain,
    /// Non-db relate field carrying the related id under its own name
    RelateId,
    /// Non-db relate field showing `attributes[name][rname]`
    RelateName { rname: String },
}

impl FieldKind {
    pub fn classify(name: &str, field_type: &str, definition: &ViewFieldDefinition) -> Self {
        let non_db_relate = field_type == RELATE_TYPE && definition.source() == NON_DB_SOURCE;

        if non_db_relate && definition.id_name() == name {
            return FieldKind::RelateId;
        }

        if non_db_relate && !definition.rname().is_empty() {
            return FieldKind::RelateName {
                rname: definition.rname().to_string(),
            };
        }

        FieldKind::Plain
    }
}

/// One derived field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    pub value: Value,

    /// Full related object, for relate fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_object: Option<Value>,

    pub label: String,

    pub definition: ViewFieldDefinition,
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        FieldKind::classify(&self.name, &self.field_type, &self.definition)
    }

    pub fn is_empty(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Field name -> Field, keeping definition order
///
/// Serialized as an object keyed by field name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: Vec<Field>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field; a field with the same name is replaced in place
    pub fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Field> {
        self.fields.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<Field>> for FieldMap {
    fn from(fields: Vec<Field>) -> Self {
        let mut map = FieldMap::new();
        for field in fields {
            map.insert(field);
        }
        map
    }
}

impl From<FieldMap> for Vec<Field> {
    fn from(map: FieldMap) -> Self {
        map.fields
    }
}

impl Serialize for FieldMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.fields.iter().map(|f| (f.name.as_str(), f)))
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldMapVisitor;

        impl<'de> Visitor<'de> for FieldMapVisitor {
            type Value = FieldMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of field name to field")
            }

            fn visit_map<A>(self, mut access: A) -> Result<FieldMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = FieldMap::new();
                while let Some((name, mut field)) = access.next_entry::<String, Field>()? {
                    // the key is authoritative
                    field.name = name;
                    map.insert(field);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FieldMapVisitor)
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
