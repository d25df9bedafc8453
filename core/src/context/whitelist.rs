//! # Whitelist Pruning
//!
//! Keeps only the classes reachable from operations on whitelisted paths. A
//! kept class keeps its union members and the union it belongs to.
//!
//! Marking runs over every schema before any class is removed, so the result
//! does not depend on schema order and no kept class points at a removed one.

use crate::reference::{collect_refs, resolve_reference, split_reference};
use crate::registry::Registry;
use indexmap::IndexSet;
use std::collections::HashSet;
use tracing::debug;

/// Mark-and-sweep over the relations recorded while resolving types.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitelistPruner;

impl WhitelistPruner {
    /// Marks then sweeps. Returns how many classes were removed.
    ///
    /// Does nothing when no path is whitelisted.
    pub fn prune(&self, registry: &mut Registry) -> usize {
        if registry.whitelisted_paths().is_empty() {
            return 0;
        }

        let marks: Vec<(String, IndexSet<String>)> = registry
            .schemas()
            .map(|schema| (schema.origin().to_string(), self.mark(registry, schema.origin())))
            .collect();

        let kept: HashSet<String> = marks
            .iter()
            .flat_map(|(_, needed)| needed.iter().cloned())
            .collect();

        for (origin, needed) in marks {
            if let Some(schema) = registry.schema_mut(&origin) {
                schema.set_needed(needed);
            }
        }

        let mut removed = 0;
        for schema in registry.schemas_mut() {
            for reference in schema.class_references() {
                if !kept.contains(&reference) {
                    debug!(reference, "pruning class not reached by whitelisted paths");
                    schema.remove_class(&reference);
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Classes reached from the whitelisted operations of the schema at `origin`.
    pub fn mark(&self, registry: &Registry, origin: &str) -> IndexSet<String> {
        let Some(schema) = registry.schema(origin) else {
            return IndexSet::new();
        };

        let mut needed = IndexSet::new();
        let mut visited_nodes = HashSet::new();
        let mut pending: Vec<String> = Vec::new();

        for operation in schema.operations() {
            if !registry.is_whitelisted(&operation.path) {
                continue;
            }
            let mut refs = Vec::new();
            collect_refs(&operation.operation, &mut refs);
            pending.extend(refs.into_iter().map(|r| resolve_reference(origin, r)));
        }

        while let Some(reference) = pending.pop() {
            if let Some(class) = registry.class(&reference) {
                if !needed.insert(reference.clone()) {
                    continue;
                }
                if let Some(relations) = registry.relations_of(&reference) {
                    pending.extend(relations.iter().cloned());
                }
                pending.extend(class.union_children().iter().cloned());
                if let Some(parent) = class.union_parent() {
                    pending.push(parent.to_string());
                }
                continue;
            }

            // Shared parameters, responses and request bodies are not classes
            // but may point at some.
            if !visited_nodes.insert(reference.clone()) {
                continue;
            }
            if let Some(node) = registry.resolve_node(&reference) {
                let (document, _) = split_reference(&reference);
                let mut refs = Vec::new();
                collect_refs(node, &mut refs);
                pending.extend(refs.into_iter().map(|r| resolve_reference(document, r)));
            }
        }

        needed
    }
}
