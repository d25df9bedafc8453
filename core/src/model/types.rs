#![deny(missing_docs)]

//! # Resolved Types
//!
//! The target-neutral type a property or extension resolves to.

use serde::Serialize;

/// Primitive JSON Schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// `type: string`
    String,
    /// `type: integer`
    Integer,
    /// `type: number`
    Number,
    /// `type: boolean`
    Boolean,
    /// `type: null`
    Null,
}

impl ScalarKind {
    /// Maps a JSON Schema `type` keyword value to a scalar kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

/// A date/time value bound to a generated scalar wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTimeType {
    /// Name of the generated wrapper the value is decoded into.
    pub class: String,
    /// Format used when writing the value.
    pub output_format: String,
    /// Format used when reading the value (defaults to `output_format`).
    pub input_format: Option<String>,
    /// Whether the emitter should expose an interface rather than the concrete wrapper.
    pub prefer_interface: Option<bool>,
}

/// A fully resolved type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// A primitive.
    Scalar {
        /// The primitive kind.
        scalar: ScalarKind,
    },
    /// A date or date-time string decoded into a wrapper.
    DateTime(DateTimeType),
    /// A generated class.
    Object {
        /// Reference id of the class.
        reference: String,
        /// Class name at resolution time.
        name: String,
    },
    /// A list of items.
    Array {
        /// Item type.
        items: Box<Type>,
    },
    /// A string-keyed map.
    Map {
        /// Value type.
        values: Box<Type>,
    },
    /// One of several types (`oneOf`, `anyOf`, `type: [..]`).
    Multiple {
        /// Candidate types, in document order.
        types: Vec<Type>,
    },
    /// Anything; no constraint could be derived.
    #[default]
    Mixed,
}

impl Type {
    /// Shorthand for [`Type::Scalar`].
    pub fn scalar(scalar: ScalarKind) -> Self {
        Type::Scalar { scalar }
    }

    /// Shorthand for [`Type::Array`].
    pub fn array(items: Type) -> Self {
        Type::Array {
            items: Box::new(items),
        }
    }

    /// Shorthand for [`Type::Map`].
    pub fn map(values: Type) -> Self {
        Type::Map {
            values: Box::new(values),
        }
    }

    /// Reference ids of every class this type points at, in traversal order.
    pub fn class_references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_class_references(&mut out);
        out
    }

    fn collect_class_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Type::Object { reference, .. } => out.push(reference),
            Type::Array { items } => items.collect_class_references(out),
            Type::Map { values } => values.collect_class_references(out),
            Type::Multiple { types } => {
                for ty in types {
                    ty.collect_class_references(out);
                }
            }
            Type::Scalar { .. } | Type::DateTime(_) | Type::Mixed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(reference: &str) -> Type {
        Type::Object {
            reference: reference.to_string(),
            name: "X".to_string(),
        }
    }

    #[test]
    fn test_class_references_walks_nested_types() {
        let ty = Type::Multiple {
            types: vec![
                Type::array(object("a.yaml#/A")),
                Type::map(Type::array(object("a.yaml#/B"))),
                Type::scalar(ScalarKind::String),
            ],
        };
        assert_eq!(ty.class_references(), vec!["a.yaml#/A", "a.yaml#/B"]);
    }

    #[test]
    fn test_scalar_keywords() {
        assert_eq!(ScalarKind::from_keyword("integer"), Some(ScalarKind::Integer));
        assert_eq!(ScalarKind::from_keyword("object"), None);
    }
}
