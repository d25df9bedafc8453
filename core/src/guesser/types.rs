//! # Type Guessers
//!
//! One guesser per schema shape. The chain asks them in order; see
//! [`ChainGuesser::from_config`](crate::guesser::ChainGuesser::from_config).

use crate::error::{AppError, AppResult};
use crate::guesser::{is_reference, type_keyword, SchemaGuesser, TypeGuesser};
use crate::model::{ScalarKind, Type};
use crate::reference::{child_reference, resolve_reference, split_reference};
use crate::registry::Registry;
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use tracing::trace;

/// Follows `$ref`: a referenced class becomes [`Type::Object`], anything else is
/// typed from the node the reference points at.
///
/// A reference met again while it is still being resolved is typed as
/// [`Type::Mixed`].
#[derive(Debug, Default)]
pub struct ReferenceGuesser {
    resolving: RefCell<Vec<String>>,
}

impl TypeGuesser for ReferenceGuesser {
    fn supports(&self, node: &JsonValue, _reference: &str, _registry: &Registry) -> bool {
        is_reference(node)
    }

    fn guess_type(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type> {
        let target = node
            .get("$ref")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        let (origin, _) = split_reference(reference);
        let target_reference = resolve_reference(origin, target);

        if let Some(class) = registry.class(&target_reference) {
            return Ok(Type::Object {
                reference: target_reference,
                name: class.name.clone(),
            });
        }

        let target_node = registry.resolve_node(&target_reference).ok_or_else(|| {
            AppError::Guess(format!(
                "Unresolvable reference '{}' in '{}'",
                target, reference
            ))
        })?;

        if self.resolving.borrow().contains(&target_reference) {
            trace!(reference = %target_reference, "recursive reference typed as mixed");
            return Ok(Type::Mixed);
        }

        self.resolving.borrow_mut().push(target_reference.clone());
        let resolved = chain.guess_type(target_node, name, &target_reference, registry);
        self.resolving.borrow_mut().pop();
        resolved
    }
}

/// A node registered as a class is typed as that class.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectGuesser;

impl TypeGuesser for ObjectGuesser {
    fn supports(&self, node: &JsonValue, reference: &str, registry: &Registry) -> bool {
        !is_reference(node) && registry.has_class(reference)
    }

    fn guess_type(
        &self,
        _chain: &dyn SchemaGuesser,
        _node: &JsonValue,
        _name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type> {
        let name = registry
            .class(reference)
            .map(|class| class.name.clone())
            .unwrap_or_default();
        Ok(Type::Object {
            reference: reference.to_string(),
            name,
        })
    }
}

/// `oneOf`, `anyOf` and `type: [..]` lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleGuesser;

impl MultipleGuesser {
    fn guess_type_list(
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        keywords: &[&str],
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type> {
        let mut types = Vec::new();
        for keyword in keywords.iter().filter(|keyword| **keyword != "null") {
            let mut variant = node.clone();
            variant["type"] = JsonValue::String((*keyword).to_string());
            types.push(chain.guess_type(&variant, name, reference, registry)?);
        }

        Ok(match types.len() {
            0 => Type::scalar(ScalarKind::Null),
            1 => types.remove(0),
            _ => Type::Multiple { types },
        })
    }
}

impl TypeGuesser for MultipleGuesser {
    fn supports(&self, node: &JsonValue, _reference: &str, _registry: &Registry) -> bool {
        node.get("type").is_some_and(JsonValue::is_array)
            || node.get("oneOf").is_some_and(JsonValue::is_array)
            || node.get("anyOf").is_some_and(JsonValue::is_array)
    }

    fn guess_type(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type> {
        if let Some(list) = node.get("type").and_then(JsonValue::as_array) {
            let keywords: Vec<&str> = list.iter().filter_map(JsonValue::as_str).collect();
            return Self::guess_type_list(chain, node, &keywords, name, reference, registry);
        }

        let mut types = Vec::new();
        for keyword in ["oneOf", "anyOf"] {
            let Some(items) = node.get(keyword).and_then(JsonValue::as_array) else {
                continue;
            };
            for (index, item) in items.iter().enumerate() {
                let index = index.to_string();
                let item_reference = child_reference(reference, &[keyword, index.as_str()]);
                types.push(chain.guess_type(item, name, &item_reference, registry)?);
            }
        }
        Ok(Type::Multiple { types })
    }
}

/// `type: array`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayGuesser;

impl TypeGuesser for ArrayGuesser {
    fn supports(&self, node: &JsonValue, _reference: &str, _registry: &Registry) -> bool {
        match type_keyword(node) {
            Some(kind) => kind == "array",
            None => node.get("items").is_some(),
        }
    }

    fn guess_type(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type> {
        let items_reference = child_reference(reference, &["items"]);
        let items = match node.get("items") {
            Some(items @ JsonValue::Object(_)) => {
                chain.guess_type(items, name, &items_reference, registry)?
            }
            Some(JsonValue::Array(tuple)) => {
                let mut types = Vec::with_capacity(tuple.len());
                for (index, item) in tuple.iter().enumerate() {
                    let index = index.to_string();
                    let item_reference = child_reference(&items_reference, &[index.as_str()]);
                    types.push(chain.guess_type(item, name, &item_reference, registry)?);
                }
                Type::Multiple { types }
            }
            _ => Type::Mixed,
        };
        Ok(Type::array(items))
    }
}

/// Objects without declared structure: maps keyed by string.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapGuesser;

impl TypeGuesser for MapGuesser {
    fn supports(&self, node: &JsonValue, _reference: &str, _registry: &Registry) -> bool {
        match type_keyword(node) {
            Some(kind) => kind == "object",
            None => node.get("additionalProperties").is_some(),
        }
    }

    fn guess_type(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type> {
        let values = match node.get("additionalProperties") {
            Some(values @ JsonValue::Object(_)) => {
                let values_reference = child_reference(reference, &["additionalProperties"]);
                chain.guess_type(values, name, &values_reference, registry)?
            }
            _ => Type::Mixed,
        };
        Ok(Type::map(values))
    }
}

/// `string`, `integer`, `number`, `boolean` and `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTypeGuesser;

impl TypeGuesser for SimpleTypeGuesser {
    fn supports(&self, node: &JsonValue, _reference: &str, _registry: &Registry) -> bool {
        type_keyword(node).and_then(ScalarKind::from_keyword).is_some()
    }

    fn guess_type(
        &self,
        _chain: &dyn SchemaGuesser,
        node: &JsonValue,
        _name: &str,
        _reference: &str,
        _registry: &Registry,
    ) -> AppResult<Type> {
        let scalar = type_keyword(node)
            .and_then(ScalarKind::from_keyword)
            .ok_or_else(|| AppError::Guess("Node has no scalar type".to_string()))?;
        Ok(Type::scalar(scalar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::guesser::ChainGuesser;
    use crate::model::Class;
    use crate::registry::Schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn setup() -> (ChainGuesser, Registry) {
        let mut schema = Schema::new("d", "Api");
        schema.set_parsed(json!({"definitions": {
            "Pet": {"properties": {"id": {"type": "integer"}}},
            "Id": {"type": "integer"},
            "Loop": {"type": "array", "items": {"$ref": "#/definitions/Loop"}}
        }}));
        schema.add_class(Class::new("d#/definitions/Pet", "Pet", json!({})));
        let mut registry = Registry::new();
        registry.add_schema(schema);
        (
            ChainGuesser::from_config(&GeneratorConfig::default()),
            registry,
        )
    }

    fn pet() -> Type {
        Type::Object {
            reference: "d#/definitions/Pet".into(),
            name: "Pet".into(),
        }
    }

    #[test]
    fn test_reference_to_class_and_to_plain_schema() {
        let (chain, registry) = setup();
        let to_class = chain
            .guess_type(&json!({"$ref": "#/definitions/Pet"}), "p", "d#/x", &registry)
            .unwrap();
        let to_scalar = chain
            .guess_type(&json!({"$ref": "#/definitions/Id"}), "p", "d#/x", &registry)
            .unwrap();

        assert_eq!(to_class, pet());
        assert_eq!(to_scalar, Type::scalar(ScalarKind::Integer));
    }

    #[test]
    fn test_recursive_reference_terminates() {
        let (chain, registry) = setup();
        let ty = chain
            .guess_type(&json!({"$ref": "#/definitions/Loop"}), "p", "d#/x", &registry)
            .unwrap();
        assert_eq!(ty, Type::array(Type::Mixed));
    }

    #[test]
    fn test_dangling_reference_fails() {
        let (chain, registry) = setup();
        let err = chain
            .guess_type(&json!({"$ref": "#/definitions/Nope"}), "p", "d#/x", &registry)
            .unwrap_err();
        assert!(matches!(err, AppError::Guess(_)));
    }

    #[test]
    fn test_arrays_and_maps() {
        let (chain, registry) = setup();
        let array = chain
            .guess_type(
                &json!({"type": "array", "items": {"$ref": "#/definitions/Pet"}}),
                "p",
                "d#/x",
                &registry,
            )
            .unwrap();
        let map = chain
            .guess_type(
                &json!({"type": "object", "additionalProperties": {"type": "string"}}),
                "p",
                "d#/x",
                &registry,
            )
            .unwrap();
        let free_map = chain
            .guess_type(&json!({"type": "object"}), "p", "d#/x", &registry)
            .unwrap();

        assert_eq!(array, Type::array(pet()));
        assert_eq!(map, Type::map(Type::scalar(ScalarKind::String)));
        assert_eq!(free_map, Type::map(Type::Mixed));
    }

    #[test]
    fn test_one_of_and_type_lists() {
        let (chain, registry) = setup();
        let one_of = chain
            .guess_type(
                &json!({"oneOf": [{"$ref": "#/definitions/Pet"}, {"type": "string"}]}),
                "p",
                "d#/x",
                &registry,
            )
            .unwrap();
        let nullable = chain
            .guess_type(&json!({"type": ["string", "null"]}), "p", "d#/x", &registry)
            .unwrap();
        let list = chain
            .guess_type(&json!({"type": ["string", "integer"]}), "p", "d#/x", &registry)
            .unwrap();

        assert_eq!(
            one_of,
            Type::Multiple {
                types: vec![pet(), Type::scalar(ScalarKind::String)]
            }
        );
        assert_eq!(nullable, Type::scalar(ScalarKind::String));
        assert_eq!(
            list,
            Type::Multiple {
                types: vec![
                    Type::scalar(ScalarKind::String),
                    Type::scalar(ScalarKind::Integer)
                ]
            }
        );
    }

    #[test]
    fn test_registered_inline_class() {
        let (chain, registry) = setup();
        let ty = chain
            .guess_type(&json!({"properties": {}}), "p", "d#/definitions/Pet", &registry)
            .unwrap();
        assert_eq!(ty, pet());
    }
}
