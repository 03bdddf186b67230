//! Field Derivation Engine
//!
//! Builds the typed `FieldMap` of a record from its raw attributes and the
//! active view-field definitions. Pure: no state, no I/O, same inputs give
//! the same map.

use crate::models::{Field, FieldKind, FieldMap, Record, ViewFieldDefinition};
use crate::services::Localization;
use serde_json::Value;

/// Stateless field builder
pub struct FieldDeriver;

impl FieldDeriver {
    /// Derive one field per usable definition, in definition order
    ///
    /// Definitions without a name are skipped. Missing attributes give a
    /// `Value::Null` field value, never an error.
    pub fn derive(
        record: &Record,
        definitions: &[ViewFieldDefinition],
        language: &dyn Localization,
    ) -> FieldMap {
        let mut fields = FieldMap::new();

        for definition in definitions {
            if definition.name.is_empty() {
                continue;
            }
            fields.insert(Self::build_field(definition, record, language));
        }

        fields
    }

    /// Build a single field from its definition
    pub fn build_field(
        definition: &ViewFieldDefinition,
        record: &Record,
        language: &dyn Localization,
    ) -> Field {
        let name = definition.name.clone();
        let field_type = definition.field_type.clone();
        let attribute = record.attributes.get(&name);

        let (value, value_object) = match FieldKind::classify(&name, &field_type, definition) {
            FieldKind::RelateName { rname } => {
                let related = attribute.filter(|v| v.is_object());
                let value = related
                    .and_then(|obj| obj.get(&rname))
                    .cloned()
                    .unwrap_or(Value::Null);
                (value, related.cloned())
            }
            FieldKind::RelateId | FieldKind::Plain => {
                (attribute.cloned().unwrap_or(Value::Null), None)
            }
        };

        Field {
            label: Self::resolve_label(definition, &record.module, language),
            name,
            field_type,
            value,
            value_object,
            definition: definition.clone(),
        }
    }

    /// Label key translated for the module, else the key, else the field name
    fn resolve_label(
        definition: &ViewFieldDefinition,
        module: &str,
        language: &dyn Localization,
    ) -> String {
        match definition.label.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => language
                .translate(key, module)
                .unwrap_or_else(|| key.to_string()),
            None => definition.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LanguageStrings;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn account() -> Record {
        Record::new("Accounts")
            .with_id("1")
            .with_attribute("name", json!("Acme"))
            .with_attribute("assigned_user_id", json!("u1"))
            .with_attribute("assigned_user", json!({"id": "u1", "user_name": "alice"}))
    }

    fn definitions() -> Vec<ViewFieldDefinition> {
        vec![
            ViewFieldDefinition::new("name", "name").with_label("LBL_NAME"),
            ViewFieldDefinition::new("phone_office", "phone"),
            ViewFieldDefinition::relate("assigned_user").with_rname("user_name"),
            ViewFieldDefinition::relate("assigned_user_id").with_id_name("assigned_user_id"),
        ]
    }

    #[test]
    fn test_keys_follow_definition_order() {
        let fields = FieldDeriver::derive(&account(), &definitions(), &LanguageStrings::new());

        assert_eq!(
            fields.names().collect::<Vec<_>>(),
            vec!["name", "phone_office", "assigned_user", "assigned_user_id"]
        );
    }

    #[test]
    fn test_unnamed_definitions_are_skipped() {
        let mut defs = definitions();
        defs.insert(1, ViewFieldDefinition::default());

        let fields = FieldDeriver::derive(&account(), &defs, &LanguageStrings::new());
        assert_eq!(fields.len(), 4);
        assert!(!fields.contains(""));
    }

    #[test]
    fn test_values_read_from_attributes() {
        let fields = FieldDeriver::derive(&account(), &definitions(), &LanguageStrings::new());

        assert_eq!(fields.get("name").unwrap().value, json!("Acme"));
        assert_eq!(fields.get("assigned_user_id").unwrap().value, json!("u1"));
    }

    #[test]
    fn test_missing_attribute_is_null() {
        let fields = FieldDeriver::derive(&account(), &definitions(), &LanguageStrings::new());

        let phone = fields.get("phone_office").unwrap();
        assert_eq!(phone.value, Value::Null);
        assert!(phone.is_empty());
    }

    #[test]
    fn test_relate_name_reads_nested_value() {
        let fields = FieldDeriver::derive(&account(), &definitions(), &LanguageStrings::new());

        let user = fields.get("assigned_user").unwrap();
        assert_eq!(user.value, json!("alice"));
        assert_eq!(user.value_object, Some(json!({"id": "u1", "user_name": "alice"})));
        assert_eq!(user.kind(), FieldKind::RelateName { rname: "user_name".to_string() });
    }

    #[test]
    fn test_relate_name_with_non_object_attribute() {
        let record = account().with_attribute("assigned_user", json!("alice"));
        let fields = FieldDeriver::derive(&record, &definitions(), &LanguageStrings::new());

        let user = fields.get("assigned_user").unwrap();
        assert_eq!(user.value, Value::Null);
        assert_eq!(user.value_object, None);
    }

    #[test]
    fn test_labels_resolved_through_language() {
        let language = LanguageStrings::new().with_module_string("Accounts", "LBL_NAME", "Account Name");
        let fields = FieldDeriver::derive(&account(), &definitions(), &language);

        assert_eq!(fields.get("name").unwrap().label, "Account Name");
        assert_eq!(fields.get("phone_office").unwrap().label, "phone_office");

        let untranslated = FieldDeriver::derive(&account(), &definitions(), &LanguageStrings::new());
        assert_eq!(untranslated.get("name").unwrap().label, "LBL_NAME");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let language = LanguageStrings::new();
        let first = FieldDeriver::derive(&account(), &definitions(), &language);
        let second = FieldDeriver::derive(&account(), &definitions(), &language);

        assert_eq!(first, second);
    }

    #[test]
    fn test_field_carries_definition() {
        let fields = FieldDeriver::derive(&account(), &definitions(), &LanguageStrings::new());
        let field = fields.get("assigned_user_id").unwrap();

        assert_eq!(field.field_type, "relate");
        assert_eq!(field.definition.id_name(), "assigned_user_id");
    }
}
