//! # Object Schema Guesser
//!
//! Registers a class for every object schema with declared structure, and
//! recurses into inline object schemas nested under it.

use crate::error::{AppError, AppResult};
use crate::guesser::{is_reference, type_keyword, ClassGuesser, SchemaGuesser};
use crate::model::{Class, ExtensionObject};
use crate::naming::inflector::{classify, slugify};
use crate::naming::Naming;
use crate::reference::{child_reference, resolve_reference, split_reference};
use crate::registry::Registry;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use tracing::trace;

/// Pattern used for `additionalProperties` extension slots.
pub const ADDITIONAL_PROPERTIES_PATTERN: &str = ".*";

/// Guesses classes from object schemas.
///
/// A node is a class when it declares `properties`, `allOf` or a
/// `discriminator`. Plain `type: object` nodes without structure are maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaClassGuesser {
    naming: Naming,
}

impl SchemaClassGuesser {
    /// Creates the guesser with a naming convention for class names.
    pub fn new(naming: Naming) -> Self {
        Self { naming }
    }

    fn extensions(node: &JsonValue, reference: &str) -> Vec<(String, ExtensionObject)> {
        let mut out = Vec::new();

        if let Some(patterns) = node.get("patternProperties").and_then(JsonValue::as_object) {
            for (pattern, object) in patterns {
                out.push((
                    pattern.clone(),
                    ExtensionObject {
                        object: object.clone(),
                        reference: child_reference(
                            reference,
                            &["patternProperties", pattern.as_str()],
                        ),
                    },
                ));
            }
        }

        let additional = match node.get("additionalProperties") {
            Some(object @ JsonValue::Object(_)) => Some(object.clone()),
            Some(JsonValue::Bool(true)) => Some(JsonValue::Object(Map::new())),
            _ => None,
        };
        if let Some(object) = additional {
            out.push((
                ADDITIONAL_PROPERTIES_PATTERN.to_string(),
                ExtensionObject {
                    object,
                    reference: child_reference(reference, &["additionalProperties"]),
                },
            ));
        }

        out
    }

    /// Discriminator property name, and the child references it selects from.
    ///
    /// Children come from `discriminator.mapping` when present, otherwise from
    /// the `$ref`s listed under `oneOf` / `anyOf`.
    fn discriminator(node: &JsonValue, reference: &str) -> Option<(String, Vec<String>)> {
        let discriminator = node.get("discriminator")?;
        let (origin, _) = split_reference(reference);

        let property_name = match discriminator {
            JsonValue::String(name) => name.clone(),
            other => other.get("propertyName")?.as_str()?.to_string(),
        };

        let mapped: Vec<String> = discriminator
            .get("mapping")
            .and_then(JsonValue::as_object)
            .map(|mapping| {
                mapping
                    .values()
                    .filter_map(JsonValue::as_str)
                    .map(|target| resolve_reference(origin, target))
                    .collect()
            })
            .unwrap_or_default();

        let mut children = mapped;
        if children.is_empty() {
            for keyword in ["oneOf", "anyOf"] {
                let Some(items) = node.get(keyword).and_then(JsonValue::as_array) else {
                    continue;
                };
                children.extend(
                    items
                        .iter()
                        .filter_map(|item| item.get("$ref").and_then(JsonValue::as_str))
                        .map(|target| resolve_reference(origin, target)),
                );
            }
        }

        let mut seen = HashSet::new();
        children.retain(|child| seen.insert(child.clone()));

        Some((property_name, children))
    }

    /// Hands inline schemas nested under the class to the chain.
    fn guess_nested(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        class_name: &str,
        reference: &str,
        registry: &mut Registry,
    ) -> AppResult<()> {
        if let Some(properties) = node.get("properties").and_then(JsonValue::as_object) {
            for (property_name, property) in properties {
                let nested_name = format!("{}{}", class_name, classify(property_name));
                let property_reference =
                    child_reference(reference, &["properties", property_name.as_str()]);
                chain.guess_class(property, &nested_name, &property_reference, registry)?;

                if let Some(items) = property.get("items").filter(|items| items.is_object()) {
                    chain.guess_class(
                        items,
                        &format!("{}Item", nested_name),
                        &child_reference(&property_reference, &["items"]),
                        registry,
                    )?;
                }
            }
        }

        if let Some(members) = node.get("allOf").and_then(JsonValue::as_array) {
            for (index, member) in members.iter().enumerate() {
                if is_reference(member) {
                    continue;
                }
                let index = index.to_string();
                let member_reference = child_reference(reference, &["allOf", index.as_str()]);
                self.guess_nested(chain, member, class_name, &member_reference, registry)?;
            }
        }

        for (pattern, extension) in Self::extensions(node, reference) {
            let suffix = if pattern == ADDITIONAL_PROPERTIES_PATTERN {
                "Additional".to_string()
            } else {
                classify(&slugify(&pattern, "_"))
            };
            chain.guess_class(
                &extension.object,
                &format!("{}{}", class_name, suffix),
                &extension.reference,
                registry,
            )?;
        }

        Ok(())
    }
}

impl ClassGuesser for SchemaClassGuesser {
    fn supports(&self, node: &JsonValue) -> bool {
        if !node.is_object() || is_reference(node) {
            return false;
        }
        if matches!(type_keyword(node), Some(kind) if kind != "object") {
            return false;
        }
        node.get("properties").is_some_and(JsonValue::is_object)
            || node.get("allOf").is_some_and(JsonValue::is_array)
            || node.get("discriminator").is_some()
    }

    fn guess_class(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &mut Registry,
    ) -> AppResult<()> {
        if registry.has_class(reference) {
            return Ok(());
        }

        let class_name = self.naming.class_name(name);
        let mut class = Class::new(reference, class_name.clone(), node.clone());
        class.extensions = Self::extensions(node, reference).into_iter().collect();
        if let Some((discriminator, children)) = Self::discriminator(node, reference) {
            class = class.into_union(discriminator, children);
        }

        trace!(reference, name = %class_name, "registering class");
        let schema = registry.schema_for_reference_mut(reference).ok_or_else(|| {
            AppError::Guess(format!("No schema registered for reference '{}'", reference))
        })?;
        schema.add_class(class);

        self.guess_nested(chain, node, &class_name, reference, registry)
    }
}
