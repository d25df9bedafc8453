//! # Discriminator Hydration
//!
//! Gives every union child a back-reference to its union. Children are ids;
//! the union never owns them.

use crate::registry::Registry;
use tracing::debug;

/// Sets `union_parent` on the children of every discriminated union.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscriminatorResolver;

impl DiscriminatorResolver {
    /// Hydrates all unions across all schemas. Returns how many children were linked.
    ///
    /// Children that do not resolve to a class, or that are unions themselves,
    /// are skipped.
    pub fn hydrate(&self, registry: &mut Registry) -> usize {
        let unions: Vec<(String, Vec<String>)> = registry
            .schemas()
            .flat_map(|schema| schema.classes())
            .filter(|class| class.is_union())
            .map(|class| (class.reference.clone(), class.union_children().to_vec()))
            .collect();

        let mut linked = 0;
        for (union, children) in unions {
            for child in children {
                match registry.class_mut(&child) {
                    Some(class) => {
                        if class.set_union_parent(&union) {
                            linked += 1;
                        } else {
                            debug!(union, child, "union child is itself a union, skipping");
                        }
                    }
                    None => debug!(union, child, "union child not found, skipping"),
                }
            }
        }
        linked
    }
}
