//! Typed intermediate form of an untrusted create request body.

use serde_json::{Map, Value};

use crate::error::ParseError;

/// One field of a create request as it arrived, before any rule is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    /// The key was not present in the request object.
    Missing,
    /// The key held a JSON string (untrimmed).
    Text(String),
    /// The key held any other JSON value, including `null`.
    Other(Value),
}

impl RawField {
    fn take(map: &mut Map<String, Value>, key: &str) -> Self {
        match map.remove(key) {
            None => Self::Missing,
            Some(Value::String(s)) => Self::Text(s),
            Some(other) => Self::Other(other),
        }
    }
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// The recognised fields of a create request. Unknown keys are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInput {
    pub title: RawField,
    pub body: RawField,
    pub category: RawField,
    pub priority: RawField,
    pub author: RawField,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            title: RawField::Missing,
            body: RawField::Missing,
            category: RawField::Missing,
            priority: RawField::Missing,
            author: RawField::Missing,
        }
    }
}

impl RawInput {
    /// Decodes a request body.
    ///
    /// An empty body is treated as an empty object.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidJson`] if the bytes are not valid JSON and
    /// [`ParseError::NotAnObject`] if the top-level value is not an object.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(ParseError::NotAnObject),
        }
    }

    /// Extracts the recognised fields from an already-decoded JSON object.
    #[must_use]
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        Self {
            title: RawField::take(&mut map, "title"),
            body: RawField::take(&mut map, "body"),
            category: RawField::take(&mut map, "category"),
            priority: RawField::take(&mut map, "priority"),
            author: RawField::take(&mut map, "author"),
        }
    }
}
