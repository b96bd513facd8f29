//! JSON Schema export for validators
//!
//! Generates JSON Schema 2020-12 documents. A [`JsonSchema`] is an ordered
//! list of keywords: fields are serialized in the order they were pushed, so
//! the same validator always produces byte-identical output.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constraints::Constraint;

/// JSON Schema document (or fragment) with keywords in emission order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonSchema {
    fields: Map<String, Value>,
}

impl JsonSchema {
    /// Create a new empty schema (accepts anything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema for a specific type
    pub fn with_type(schema_type: &str) -> Self {
        Self::new().field("type", schema_type)
    }

    /// Append a keyword. Re-setting a keyword keeps its original position.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a keyword in place
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Append the keyword documenting a constraint
    pub fn push_constraint<T: ?Sized>(&mut self, constraint: &Constraint<T>) {
        self.push(constraint.key(), constraint.schema_value().clone());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Keyword names in emission order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Compact JSON, no whitespace
    pub fn to_json(&self) -> String {
        // Display of a serde_json::Value is infallible compact JSON
        Value::Object(self.fields.clone()).to_string()
    }

    /// Compact JSON as bytes
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_json().into_bytes()
    }
}

impl From<JsonSchema> for Value {
    fn from(schema: JsonSchema) -> Self {
        schema.into_value()
    }
}
