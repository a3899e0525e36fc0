//! Typed JSON codec for session values.
//!
//! Session state is a string-keyed map whose values are mostly plain JSON,
//! but some fields (the raw cookie blob) are binary. Binary values are
//! written as a tagged object:
//!
//! ```json
//! {"__class__": "bytes", "__value__": "<base64>"}
//! ```
//!
//! so the settings file stays valid JSON while round-tripping arbitrary
//! byte strings.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

const CLASS_TAG: &str = "__class__";
const VALUE_TAG: &str = "__value__";
const BYTES_CLASS: &str = "bytes";

/// A single value in the session settings map.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<SessionValue>),
    Map(BTreeMap<String, SessionValue>),
}

impl SessionValue {
    /// Encode into a JSON value, tagging binary fields.
    pub fn to_json(&self) -> Value {
        match self {
            SessionValue::Null => Value::Null,
            SessionValue::Bool(b) => Value::Bool(*b),
            SessionValue::Number(n) => Value::Number(n.clone()),
            SessionValue::Text(s) => Value::String(s.clone()),
            SessionValue::Bytes(b) => {
                let mut tagged = Map::new();
                tagged.insert(CLASS_TAG.to_string(), Value::String(BYTES_CLASS.to_string()));
                tagged.insert(VALUE_TAG.to_string(), Value::String(BASE64.encode(b)));
                Value::Object(tagged)
            }
            SessionValue::List(items) => {
                Value::Array(items.iter().map(SessionValue::to_json).collect())
            }
            SessionValue::Map(fields) => {
                let mut map = Map::new();
                for (key, value) in fields {
                    map.insert(key.clone(), value.to_json());
                }
                Value::Object(map)
            }
        }
    }

    /// Decode from a JSON value, recognizing tagged binary fields.
    pub fn from_json(value: &Value) -> Result<SessionValue> {
        match value {
            Value::Null => Ok(SessionValue::Null),
            Value::Bool(b) => Ok(SessionValue::Bool(*b)),
            Value::Number(n) => Ok(SessionValue::Number(n.clone())),
            Value::String(s) => Ok(SessionValue::Text(s.clone())),
            Value::Array(items) => {
                let decoded = items
                    .iter()
                    .map(SessionValue::from_json)
                    .collect::<Result<Vec<_>>>()?;
                Ok(SessionValue::List(decoded))
            }
            Value::Object(map) => {
                if map.get(CLASS_TAG).and_then(Value::as_str) == Some(BYTES_CLASS) {
                    let encoded = map.get(VALUE_TAG).and_then(Value::as_str).ok_or_else(|| {
                        Error::Session("tagged bytes object is missing __value__".to_string())
                    })?;
                    return decode_base64(encoded).map(SessionValue::Bytes);
                }

                let mut fields = BTreeMap::new();
                for (key, value) in map {
                    fields.insert(key.clone(), SessionValue::from_json(value)?);
                }
                Ok(SessionValue::Map(fields))
            }
        }
    }

    /// Interpret this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SessionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret this value as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SessionValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Interpret this value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SessionValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }
}

/// Decode base64, tolerating embedded whitespace.
///
/// Settings files written by other tooling line-wrap the base64 payload,
/// so newlines inside the encoded value are legal.
fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| Error::Session(format!("invalid base64 in tagged bytes value: {}", e)))
}
