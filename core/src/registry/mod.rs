#![deny(missing_docs)]

//! # Registry
//!
//! Holds every [`Schema`] being generated, the optional whitelist of API paths,
//! and a global lookup from reference id to [`Class`].
//!
//! A registry carries no locking: give each concurrent build its own instance.

mod schema;

pub use schema::Schema;

use crate::model::Class;
use crate::reference::{resolve_pointer, split_reference};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// All schemas of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    schemas: IndexMap<String, Schema>,
    whitelisted_paths: IndexSet<String>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one schema per origin, all sharing `root_name`.
    pub fn from_origins<I, S>(origins: I, root_name: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for origin in origins {
            registry.add_schema(Schema::new(origin, root_name));
        }
        registry
    }

    /// Adds a schema, replacing any schema with the same origin.
    pub fn add_schema(&mut self, schema: Schema) {
        self.schemas.insert(schema.origin().to_string(), schema);
    }

    /// Restricts generation to the operations of these paths.
    pub fn set_whitelisted_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelisted_paths = paths.into_iter().map(Into::into).collect();
    }

    /// The whitelisted paths. Empty means "generate everything".
    pub fn whitelisted_paths(&self) -> &IndexSet<String> {
        &self.whitelisted_paths
    }

    /// Whether `path` is whitelisted.
    pub fn is_whitelisted(&self, path: &str) -> bool {
        self.whitelisted_paths.contains(path)
    }

    /// All schemas.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// All schemas, mutably.
    pub fn schemas_mut(&mut self) -> impl Iterator<Item = &mut Schema> {
        self.schemas.values_mut()
    }

    /// Origins of all schemas in insertion order.
    pub fn origins(&self) -> Vec<String> {
        self.schemas.keys().cloned().collect()
    }

    /// The schema loaded from `origin`.
    pub fn schema(&self, origin: &str) -> Option<&Schema> {
        self.schemas.get(origin)
    }

    /// The schema loaded from `origin`, mutably.
    pub fn schema_mut(&mut self, origin: &str) -> Option<&mut Schema> {
        self.schemas.get_mut(origin)
    }

    /// The schema a reference id belongs to, by its document part.
    pub fn schema_for_reference(&self, reference: &str) -> Option<&Schema> {
        let (document, _) = split_reference(reference);
        self.schemas.get(document)
    }

    /// The schema a reference id belongs to, mutably.
    pub fn schema_for_reference_mut(&mut self, reference: &str) -> Option<&mut Schema> {
        let (document, _) = split_reference(reference);
        self.schemas.get_mut(document)
    }

    /// Global class lookup across all schemas.
    pub fn class(&self, reference: &str) -> Option<&Class> {
        if let Some(class) = self
            .schema_for_reference(reference)
            .and_then(|schema| schema.class(reference))
        {
            return Some(class);
        }
        self.schemas.values().find_map(|schema| schema.class(reference))
    }

    /// Global class lookup across all schemas, mutably.
    pub fn class_mut(&mut self, reference: &str) -> Option<&mut Class> {
        let origin = self.owning_origin(reference)?;
        self.schemas.get_mut(&origin)?.class_mut(reference)
    }

    /// Whether any schema holds a class under `reference`.
    pub fn has_class(&self, reference: &str) -> bool {
        self.class(reference).is_some()
    }

    /// Relations recorded for `reference` on whichever schema owns it.
    pub fn relations_of(&self, reference: &str) -> Option<&IndexSet<String>> {
        let origin = self.owning_origin(reference)?;
        self.schemas.get(&origin)?.relations_of(reference)
    }

    /// Resolves a reference id to the node it points at in a parsed root.
    pub fn resolve_node(&self, reference: &str) -> Option<&JsonValue> {
        let (document, fragment) = split_reference(reference);
        let root = self.schemas.get(document)?.parsed()?;
        resolve_pointer(root, fragment.unwrap_or(""))
    }

    fn owning_origin(&self, reference: &str) -> Option<String> {
        let (document, _) = split_reference(reference);
        if self
            .schemas
            .get(document)
            .is_some_and(|schema| schema.has_class(reference))
        {
            return Some(document.to_string());
        }
        self.schemas
            .iter()
            .find(|(_, schema)| schema.has_class(reference))
            .map(|(origin, _)| origin.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_global_lookup_across_schemas() {
        let mut registry = Registry::from_origins(["a.yaml", "b.yaml"], "Api");
        registry
            .schema_mut("a.yaml")
            .unwrap()
            .add_class(Class::new("a.yaml#/A", "A", json!({})));
        // Registered on a schema other than the one its document part names.
        registry
            .schema_mut("b.yaml")
            .unwrap()
            .add_class(Class::new("c.yaml#/C", "C", json!({})));

        assert_eq!(registry.class("a.yaml#/A").map(|c| c.name.as_str()), Some("A"));
        assert_eq!(registry.class("c.yaml#/C").map(|c| c.name.as_str()), Some("C"));
        assert!(registry.class_mut("c.yaml#/C").is_some());
        assert!(registry.class("a.yaml#/Missing").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut schema = Schema::new("a.yaml", "Api");
        assert!(schema.add_class(Class::new("a.yaml#/A", "A", json!({}))));
        assert!(!schema.add_class(Class::new("a.yaml#/A", "Other", json!({}))));
        assert_eq!(schema.class("a.yaml#/A").unwrap().name, "A");
    }

    #[test]
    fn test_remove_class_keeps_order() {
        let mut schema = Schema::new("a.yaml", "Api");
        for name in ["A", "B", "C"] {
            schema.add_class(Class::new(format!("a.yaml#/{}", name), name, json!({})));
        }
        schema.remove_class("a.yaml#/B");
        assert_eq!(
            schema.class_references(),
            vec!["a.yaml#/A".to_string(), "a.yaml#/C".to_string()]
        );
    }

    #[test]
    fn test_resolve_node() {
        let mut registry = Registry::from_origins(["a.yaml"], "Api");
        registry
            .schema_mut("a.yaml")
            .unwrap()
            .set_parsed(json!({"definitions": {"Pet": {"type": "object"}}}));

        assert_eq!(
            registry.resolve_node("a.yaml#/definitions/Pet"),
            Some(&json!({"type": "object"}))
        );
        assert_eq!(registry.resolve_node("z.yaml#/definitions/Pet"), None);
    }

    #[test]
    fn test_whitelist() {
        let mut registry = Registry::new();
        assert!(registry.whitelisted_paths().is_empty());
        registry.set_whitelisted_paths(["/pets"]);
        assert!(registry.is_whitelisted("/pets"));
        assert!(!registry.is_whitelisted("/owners"));
    }
}
