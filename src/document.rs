//! Documents and batch requests as they arrive from a database export.
//!
//! A [`Document`] is schema-less: any JSON object is accepted and kept
//! verbatim, including fields the ingestor knows nothing about (`_rev`,
//! `~version`, ...). Field order is preserved so a stored document
//! re-encodes the way it was received.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One exported record: a JSON object of arbitrary fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The string value of `field`, if present and a string.
    pub fn key(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Document(map)
    }
}

impl TryFrom<Value> for Document {
    type Error = Value;

    /// Only JSON objects are documents; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Document(map)),
            other => Err(other),
        }
    }
}

/// Name of a JSON value's kind, for log and error messages.
pub(crate) fn value_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "absent",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "bool",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// A caller-submitted batch: `{ "documents": [ ... ] }`.
///
/// A missing or `null` `documents` field reads as an empty batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub documents: Vec<Document>,
}

impl BatchRequest {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Parse a serialized batch payload.
    ///
    /// The payload must be a JSON object; the sequence form a derived
    /// deserializer would also accept is rejected.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(payload)? {
            Value::Object(map) => serde_json::from_value(Value::Object(map)),
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"an object with a `documents` field",
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Document>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Document>>::deserialize(deserializer)?.unwrap_or_default())
}
