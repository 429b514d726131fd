//! Decoded broadcaster events and their spike/TTL classification.
//!
//! An [`Event`] is the JSON object carried in the payload frame of one
//! inbound message. The only field the listener looks at is
//! `event_type`; everything else is passed through to the callbacks
//! untouched.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ListenerError;

/// Name of the discriminator field.
pub const EVENT_TYPE_FIELD: &str = "event_type";

/// Discriminator value that marks a spike event.
pub const SPIKE_EVENT_TYPE: &str = "spike";

/// Which callback an event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Spike detection record (`event_type == "spike"`).
    Spike,
    /// Digital trigger event. Any event that is not a spike.
    Ttl,
}

impl EventKind {
    /// Returns the kind as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spike => "spike",
            Self::Ttl => "ttl",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded event object.
///
/// No schema is enforced beyond "is a JSON object". Lives for exactly one
/// dispatch and is handed to the callback by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    /// Decodes a payload frame: UTF-8 text holding a JSON object.
    ///
    /// # Errors
    ///
    /// - [`ListenerError::InvalidUtf8`] if the frame is not valid UTF-8.
    /// - [`ListenerError::InvalidJson`] if the text is not valid JSON.
    /// - [`ListenerError::NotAnObject`] if the JSON is not an object.
    pub fn decode(payload: &[u8]) -> Result<Self, ListenerError> {
        let text = std::str::from_utf8(payload)?;
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    /// Returns the `event_type` value if present and a string.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.0.get(EVENT_TYPE_FIELD).and_then(Value::as_str)
    }

    /// Classifies the event. A missing or non-string `event_type` is a TTL
    /// event, never an error.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self.event_type() {
            Some(SPIKE_EVENT_TYPE) => EventKind::Spike,
            _ => EventKind::Ttl,
        }
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the event, returning the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Event {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Event {
    type Error = ListenerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ListenerError::NotAnObject(json_type_name(&other))),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
