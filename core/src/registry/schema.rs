#![deny(missing_docs)]

//! # Schema
//!
//! One document being generated: its parsed root, the classes and operations
//! guessed from it, and the relation bookkeeping used by whitelist pruning.

use crate::model::{Class, OperationGuess};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A document and everything discovered in it.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    origin: String,
    root_name: String,
    #[serde(skip)]
    parsed: Option<JsonValue>,
    classes: IndexMap<String, Class>,
    operations: Vec<OperationGuess>,
    #[serde(skip)]
    relations: IndexMap<String, IndexSet<String>>,
    #[serde(skip)]
    needed: IndexSet<String>,
}

impl Schema {
    /// Creates an empty schema for `origin`.
    pub fn new(origin: impl Into<String>, root_name: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            root_name: root_name.into(),
            parsed: None,
            classes: IndexMap::new(),
            operations: Vec::new(),
            relations: IndexMap::new(),
            needed: IndexSet::new(),
        }
    }

    /// The URI or path the document was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Name of the root model.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// The parsed document root, once the parse pass has run.
    pub fn parsed(&self) -> Option<&JsonValue> {
        self.parsed.as_ref()
    }

    /// Stores the parsed document root.
    pub fn set_parsed(&mut self, root: JsonValue) {
        self.parsed = Some(root);
    }

    /// Classes in discovery order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    /// Number of classes currently held.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Reference ids of the classes in discovery order.
    pub fn class_references(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// Looks up a class of this schema.
    pub fn class(&self, reference: &str) -> Option<&Class> {
        self.classes.get(reference)
    }

    /// Looks up a class of this schema for mutation.
    pub fn class_mut(&mut self, reference: &str) -> Option<&mut Class> {
        self.classes.get_mut(reference)
    }

    /// Whether a class is registered under `reference`.
    pub fn has_class(&self, reference: &str) -> bool {
        self.classes.contains_key(reference)
    }

    /// Registers a class. The first registration of a reference wins.
    pub fn add_class(&mut self, class: Class) -> bool {
        if self.classes.contains_key(&class.reference) {
            return false;
        }
        self.classes.insert(class.reference.clone(), class);
        true
    }

    /// Removes a class, keeping the order of the others.
    pub fn remove_class(&mut self, reference: &str) -> Option<Class> {
        self.classes.shift_remove(reference)
    }

    /// Operations in discovery order.
    pub fn operations(&self) -> &[OperationGuess] {
        &self.operations
    }

    /// Registers an operation.
    pub fn add_operation(&mut self, operation: OperationGuess) {
        self.operations.push(operation);
    }

    /// Records the outgoing relations of `class`.
    pub fn add_class_relations(&mut self, class: &Class) {
        let set = self.relations.entry(class.reference.clone()).or_default();
        for target in class.relations() {
            set.insert(target.to_string());
        }
    }

    /// The relations recorded for a class, if any.
    pub fn relations_of(&self, reference: &str) -> Option<&IndexSet<String>> {
        self.relations.get(reference)
    }

    /// Classes reachable from kept operations, filled by whitelist pruning.
    pub fn needed(&self) -> &IndexSet<String> {
        &self.needed
    }

    /// Replaces the needed set.
    pub fn set_needed(&mut self, needed: IndexSet<String>) {
        self.needed = needed;
    }

    /// Whether `reference` was marked as needed.
    pub fn needs_relation(&self, reference: &str) -> bool {
        self.needed.contains(reference)
    }
}
