//! # Operations
//!
//! An HTTP operation discovered while guessing classes on a document root.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// An operation found under `paths`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationGuess {
    /// HTTP method as written in the document (`get`, `post`, ...).
    pub method: String,
    /// Path template, e.g. `/pets/{petId}`.
    pub path: String,
    /// Reference id of the operation node.
    pub reference: String,
    /// The operation node.
    #[serde(skip)]
    pub operation: JsonValue,
}

impl OperationGuess {
    /// Creates an operation guess.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        reference: impl Into<String>,
        operation: JsonValue,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            reference: reference.into(),
            operation,
        }
    }

    /// The declared `operationId`, if any.
    pub fn operation_id(&self) -> Option<&str> {
        self.operation.get("operationId").and_then(JsonValue::as_str)
    }

    /// The `200` response node, if declared.
    pub fn success_response(&self) -> Option<&JsonValue> {
        self.operation.get("responses")?.get("200")
    }
}
