//! Opaque telemetry document written by the robot.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object the robot attaches to a goal (logs, sensor snapshots,
/// internal state). The server stores it verbatim and never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalMeta(Map<String, Value>);

impl GoalMeta {
    /// Wraps a JSON object.
    #[must_use]
    pub const fn new(document: Map<String, Value>) -> Self {
        Self(document)
    }

    /// Builds a document from a JSON value, returning `None` unless it is an
    /// object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(document) => Some(Self(document)),
            _ => None,
        }
    }

    /// Returns the document.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts the document into a JSON value for persistence.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
