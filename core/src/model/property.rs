//! # Properties
//!
//! A single field of a generated class.

use crate::model::types::Type;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A property discovered on a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// Name as written in the document.
    pub name: String,
    /// Identifier used by the emitter. Unique per class, case-insensitively.
    pub identifier: String,
    /// Reference id of the property schema node.
    pub reference: String,
    /// The property schema node.
    #[serde(skip)]
    pub object: JsonValue,
    /// Whether the owning schema lists this property as required.
    pub required: bool,
    /// Whether `null` is an accepted value.
    pub nullable: bool,
    /// Free-form description from the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved type. [`Type::Mixed`] until the type pass has run.
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Property {
    /// Creates an unresolved property for `object` found at `reference`.
    ///
    /// `nullable` and `description` are read from the node; the identifier starts
    /// out equal to the source name.
    pub fn new(name: impl Into<String>, reference: impl Into<String>, object: JsonValue) -> Self {
        let name = name.into();
        let nullable = object
            .get("nullable")
            .or_else(|| object.get("x-nullable"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
            || type_list_contains_null(&object);
        let description = object
            .get("description")
            .and_then(JsonValue::as_str)
            .map(str::to_string);

        Self {
            identifier: name.clone(),
            name,
            reference: reference.into(),
            object,
            required: false,
            nullable,
            description,
            ty: Type::Mixed,
        }
    }

    /// Marks the property as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

fn type_list_contains_null(object: &JsonValue) -> bool {
    object
        .get("type")
        .and_then(JsonValue::as_array)
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some("null")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_nullable_variants() {
        let oas3 = Property::new("a", "r", json!({"type": "string", "nullable": true}));
        let swagger = Property::new("b", "r", json!({"type": "string", "x-nullable": true}));
        let oas31 = Property::new("c", "r", json!({"type": ["string", "null"]}));
        let plain = Property::new("d", "r", json!({"type": "string"}));

        assert!(oas3.nullable);
        assert!(swagger.nullable);
        assert!(oas31.nullable);
        assert!(!plain.nullable);
    }

    #[test]
    fn test_new_property_is_unresolved() {
        let prop = Property::new("petId", "doc#/p", json!({"description": "The pet"}));
        assert_eq!(prop.identifier, "petId");
        assert_eq!(prop.ty, Type::Mixed);
        assert_eq!(prop.description.as_deref(), Some("The pet"));
        assert!(!prop.required);
    }
}
