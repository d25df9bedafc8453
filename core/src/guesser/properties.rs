//! # Properties Guessers
//!
//! `properties` maps and `allOf` composition.

use crate::error::{AppError, AppResult};
use crate::guesser::{PropertiesGuesser, SchemaGuesser};
use crate::model::Property;
use crate::reference::{child_reference, resolve_reference, split_reference};
use crate::registry::Registry;
use serde_json::Value as JsonValue;
use std::cell::RefCell;

/// Reads the `properties` map of an object schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectPropertiesGuesser;

impl PropertiesGuesser for ObjectPropertiesGuesser {
    fn supports(&self, node: &JsonValue) -> bool {
        node.get("properties").is_some_and(JsonValue::is_object)
    }

    fn guess_properties(
        &self,
        _chain: &dyn SchemaGuesser,
        node: &JsonValue,
        _name: &str,
        reference: &str,
        _registry: &Registry,
    ) -> AppResult<Vec<Property>> {
        let required: Vec<&str> = node
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();

        let Some(properties) = node.get("properties").and_then(JsonValue::as_object) else {
            return Ok(Vec::new());
        };

        Ok(properties
            .iter()
            .map(|(name, object)| {
                Property::new(
                    name.as_str(),
                    child_reference(reference, &["properties", name.as_str()]),
                    object.clone(),
                )
                .with_required(required.contains(&name.as_str()))
            })
            .collect())
    }
}

/// Merges the properties of every `allOf` member, in member order.
///
/// `$ref` members are followed into the loaded documents; properties taken from
/// a referenced schema keep that schema's references. A schema that reaches
/// itself through `allOf` is a guess error.
#[derive(Debug, Default)]
pub struct AllOfPropertiesGuesser {
    resolving: RefCell<Vec<String>>,
}

impl PropertiesGuesser for AllOfPropertiesGuesser {
    fn supports(&self, node: &JsonValue) -> bool {
        node.get("allOf").is_some_and(JsonValue::is_array)
    }

    fn guess_properties(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Vec<Property>> {
        let Some(members) = node.get("allOf").and_then(JsonValue::as_array) else {
            return Ok(Vec::new());
        };
        let (origin, _) = split_reference(reference);

        let mut properties = Vec::new();
        for (index, member) in members.iter().enumerate() {
            match member.get("$ref").and_then(JsonValue::as_str) {
                Some(target) => {
                    let target_reference = resolve_reference(origin, target);
                    let target_node = registry.resolve_node(&target_reference).ok_or_else(|| {
                        AppError::Guess(format!(
                            "Unresolvable allOf reference '{}' in '{}'",
                            target, reference
                        ))
                    })?;

                    if self.resolving.borrow().contains(&target_reference) {
                        return Err(AppError::Guess(format!(
                            "Cyclic allOf reference '{}' in '{}'",
                            target, reference
                        )));
                    }
                    self.resolving.borrow_mut().push(target_reference.clone());
                    let inherited =
                        chain.guess_properties(target_node, name, &target_reference, registry);
                    self.resolving.borrow_mut().pop();
                    properties.extend(inherited?);
                }
                None => {
                    let index = index.to_string();
                    let member_reference = child_reference(reference, &["allOf", index.as_str()]);
                    properties.extend(chain.guess_properties(
                        member,
                        name,
                        &member_reference,
                        registry,
                    )?);
                }
            }
        }

        Ok(properties)
    }
}
