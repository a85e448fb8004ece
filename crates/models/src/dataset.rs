use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ModelError;

/// The full persisted document: a monotonically increasing id counter plus
/// the ordered list of file records.
///
/// Records are arbitrary JSON objects; their shape is constrained only by
/// the external schema, so they stay untyped `Value`s here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(rename = "nextId")]
    pub next_id: u64,
    pub files: Vec<Value>,
}

impl Dataset {
    /// Fresh dataset for a store that has never held a record.
    pub fn empty() -> Self {
        Self { next_id: 1, files: Vec::new() }
    }

    /// Record with the given id, scanning in file order.
    pub fn find(&self, id: u64) -> Option<&Value> {
        self.files.iter().find(|f| record_id(f) == Some(id))
    }

    /// Position of the record with the given id.
    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.files.iter().position(|f| record_id(f) == Some(id))
    }

    /// `{id, name}` projections of every record, in file order.
    pub fn summaries(&self) -> Vec<FileSummary> {
        self.files.iter().map(FileSummary::of).collect()
    }
}

/// Integer id of a record, if present.
pub fn record_id(record: &Value) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

/// Force `record.id` to the given value.
pub fn assign_id(record: &mut Value, id: u64) -> Result<(), ModelError> {
    match record.as_object_mut() {
        Some(map) => {
            map.insert("id".to_string(), Value::from(id));
            Ok(())
        }
        None => Err(ModelError::NotAnObject),
    }
}

/// The `{id, name}` projection returned by the list operation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FileSummary {
    pub id: u64,
    pub name: String,
}

impl FileSummary {
    fn of(record: &Value) -> Self {
        Self {
            id: record_id(record).unwrap_or_default(),
            name: record
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}
