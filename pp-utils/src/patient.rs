//! In-memory patient record and its owning store.
//!
//! Nothing here is persisted. The store is inserted when the app is built and
//! dropped with it.

use std::collections::BTreeMap;

use bevy::ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRecord {
    fields: BTreeMap<String, Value>,
}

impl PatientRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns a copy of this record with `field` set to `value`.
    pub fn with_field(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Resource, Debug, Default)]
pub struct PatientStore {
    current: Option<PatientRecord>,
}

impl PatientStore {
    pub fn with_record(record: PatientRecord) -> Self {
        Self {
            current: Some(record),
        }
    }

    pub fn current(&self) -> Option<&PatientRecord> {
        self.current.as_ref()
    }

    pub fn replace(&mut self, record: PatientRecord) {
        self.current = Some(record);
    }

    /// Merges one field into the current record, starting from an empty record
    /// when none is loaded.
    pub fn update_field(&mut self, field: impl Into<String>, value: Value) {
        let base = self.current.take().unwrap_or_default();
        self.current = Some(base.with_field(field, value));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
