//! Save Reconciler
//!
//! Writes the staged field values back into the attribute bag the backend
//! expects, persists the draft and commits the authoritative result. The draft
//! is reconciled on a copy, so a failed save leaves staging exactly as the user
//! left it.

use crate::error::{precondition_error, RecordResult};
use crate::models::{FieldKind, Record};
use crate::services::RecordPersister;
use crate::store::commit::CommitStore;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Copy every field value of `record` into its attributes
///
/// Fields are independent, so iteration order does not matter. Fails when
/// the record has no derived fields or a relate attribute is not an object.
pub fn reconcile(record: &mut Record) -> RecordResult<()> {
    let fields = record
        .fields
        .as_ref()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| precondition_error("staged record has no derived fields"))?;

    for field in fields {
        write_field(&mut record.attributes, &field.name, field.kind(), field.value.clone())?;
    }
    Ok(())
}

fn write_field(
    attributes: &mut Map<String, Value>,
    name: &str,
    kind: FieldKind,
    value: Value,
) -> RecordResult<()> {
    match kind {
        FieldKind::Plain | FieldKind::RelateId => {
            attributes.insert(name.to_string(), value);
        }
        FieldKind::RelateName { rname } => {
            let related = attributes
                .get_mut(name)
                .and_then(Value::as_object_mut)
                .ok_or_else(|| {
                    precondition_error(format!("relate attribute '{}' is not an object", name))
                })?;
            related.insert(rname, value);
        }
    }
    Ok(())
}

/// Turns staged edits into a persisted commit
pub struct SaveReconciler {
    persister: Arc<dyn RecordPersister>,
}

impl SaveReconciler {
    pub fn new(persister: Arc<dyn RecordPersister>) -> Self {
        Self { persister }
    }

    /// Reconcile the staged draft, persist it and commit the response
    ///
    /// Errors from the backend are returned unchanged and nothing is
    /// committed.
    pub async fn save(&self, store: &CommitStore) -> RecordResult<Record> {
        let mut draft = store.staging().current();
        reconcile(&mut draft)?;

        debug!(module = %draft.module, id = %draft.id, "Persisting staged record");

        let persisted = match self.persister.persist(&draft).await {
            Ok(record) => record,
            Err(e) => {
                warn!(module = %draft.module, id = %draft.id, code = e.code(), "Save failed: {}", e);
                return Err(e);
            }
        };

        let committed = store.init(persisted);
        info!(module = %committed.module, id = %committed.id, "Saved record");
        Ok(committed)
    }
}
