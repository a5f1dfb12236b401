//! Webapp configuration pushed by the host

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Columns every candlestick configuration must carry, in check order.
pub const REQUIRED_FIELDS: [&str; 5] = ["open", "close", "low", "high", "timestamp"];

/// Field name -> raw value mapping received from the host.
///
/// The chart reads `open`, `close`, `low`, `high` and `timestamp` as
/// parallel arrays; any other keys are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebAppConfig {
    fields: Map<String, Value>,
}

impl WebAppConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a JSON object map
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Add or replace a field
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a raw field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check if a field is present and not null
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    /// Get a field as an array of raw values
    pub fn column(&self, key: &str) -> Option<&[Value]> {
        self.get(key)?.as_array().map(Vec::as_slice)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the configuration has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl From<Map<String, Value>> for WebAppConfig {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}

/// Short type name of a JSON value, used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
