#![deny(missing_docs)]

//! # Classes
//!
//! A class is one generated model: a named bag of properties guessed from a
//! schema node. Discriminated unions list their children by reference id and
//! children point back at their union the same way; the owning [`Schema`]
//! holds every class by value.
//!
//! [`Schema`]: crate::registry::Schema

use crate::model::property::Property;
use crate::model::types::Type;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Plain class or discriminated union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassKind {
    /// An ordinary class.
    Plain {
        /// Reference id of the union this class is a member of, set during hydration.
        #[serde(skip_serializing_if = "Option::is_none")]
        union_parent: Option<String>,
    },
    /// A polymorphic parent selecting a child through a discriminator property.
    DiscriminatedUnion {
        /// Name of the discriminator property.
        discriminator: String,
        /// Reference ids of the member classes.
        children: Vec<String>,
    },
}

impl Default for ClassKind {
    fn default() -> Self {
        ClassKind::Plain { union_parent: None }
    }
}

/// An extension slot: a `patternProperties` entry, or `additionalProperties` under `.*`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionObject {
    /// The schema node describing values matching the pattern.
    pub object: JsonValue,
    /// Reference id of that node.
    pub reference: String,
}

/// A generated model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    /// Unique reference id (`origin#/json/pointer`).
    pub reference: String,
    /// Class name.
    pub name: String,
    /// The schema node the class was guessed from.
    #[serde(skip)]
    pub object: JsonValue,
    /// Properties in source order.
    pub properties: Vec<Property>,
    /// Extension nodes keyed by pattern.
    #[serde(skip)]
    pub extensions: IndexMap<String, ExtensionObject>,
    /// Resolved extension types keyed by pattern.
    pub extension_types: IndexMap<String, Type>,
    /// Plain or discriminated union.
    #[serde(flatten)]
    pub kind: ClassKind,
}

impl Class {
    /// Creates a plain class with no properties yet.
    pub fn new(reference: impl Into<String>, name: impl Into<String>, object: JsonValue) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            object,
            properties: Vec::new(),
            extensions: IndexMap::new(),
            extension_types: IndexMap::new(),
            kind: ClassKind::default(),
        }
    }

    /// Turns the class into a discriminated union over `children`.
    pub fn into_union(mut self, discriminator: impl Into<String>, children: Vec<String>) -> Self {
        self.kind = ClassKind::DiscriminatedUnion {
            discriminator: discriminator.into(),
            children,
        };
        self
    }

    /// Whether this class is a discriminated union parent.
    pub fn is_union(&self) -> bool {
        matches!(self.kind, ClassKind::DiscriminatedUnion { .. })
    }

    /// Child reference ids when the class is a union, empty otherwise.
    pub fn union_children(&self) -> &[String] {
        match &self.kind {
            ClassKind::DiscriminatedUnion { children, .. } => children,
            ClassKind::Plain { .. } => &[],
        }
    }

    /// The union this class belongs to, once hydrated.
    pub fn union_parent(&self) -> Option<&str> {
        match &self.kind {
            ClassKind::Plain { union_parent } => union_parent.as_deref(),
            ClassKind::DiscriminatedUnion { .. } => None,
        }
    }

    /// Records `parent` as this class's union. Returns `false` for unions,
    /// which do not carry a back-reference.
    pub fn set_union_parent(&mut self, parent: &str) -> bool {
        match &mut self.kind {
            ClassKind::Plain { union_parent } => {
                *union_parent = Some(parent.to_string());
                true
            }
            ClassKind::DiscriminatedUnion { .. } => false,
        }
    }

    /// Reference ids of the classes reached through properties and extension types.
    pub fn relations(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for property in &self.properties {
            out.extend(property.ty.class_references());
        }
        for ty in self.extension_types.values() {
            out.extend(ty.class_references());
        }
        out
    }
}
