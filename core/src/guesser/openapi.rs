//! # Document Root Guesser
//!
//! Seeds discovery on an OpenAPI 2 (`swagger`) or OpenAPI 3 (`openapi`) root:
//! registers every operation under `paths` and hands each component schema
//! to the chain.

use crate::error::{AppError, AppResult};
use crate::guesser::{ClassGuesser, SchemaGuesser};
use crate::model::OperationGuess;
use crate::reference::child_reference;
use crate::registry::Registry;
use serde_json::Value as JsonValue;
use tracing::debug;

/// HTTP methods an OpenAPI path item may declare.
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Guesser for whole OpenAPI documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiGuesser;

impl OpenApiGuesser {
    fn register_operations(
        &self,
        root: &JsonValue,
        reference: &str,
        registry: &mut Registry,
    ) -> AppResult<()> {
        let Some(paths) = root.get("paths").and_then(JsonValue::as_object) else {
            return Ok(());
        };

        let schema = registry.schema_for_reference_mut(reference).ok_or_else(|| {
            AppError::Guess(format!("No schema registered for reference '{}'", reference))
        })?;

        for (path, item) in paths {
            for method in HTTP_METHODS {
                let Some(operation) = item.get(*method).filter(|op| op.is_object()) else {
                    continue;
                };
                schema.add_operation(OperationGuess::new(
                    *method,
                    path.as_str(),
                    child_reference(reference, &["paths", path.as_str(), *method]),
                    operation.clone(),
                ));
            }
        }

        Ok(())
    }
}

impl ClassGuesser for OpenApiGuesser {
    fn supports(&self, node: &JsonValue) -> bool {
        node.get("openapi").is_some() || node.get("swagger").is_some()
    }

    fn guess_class(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        _name: &str,
        reference: &str,
        registry: &mut Registry,
    ) -> AppResult<()> {
        self.register_operations(node, reference, registry)?;

        let sections: [(&[&str], Option<&JsonValue>); 2] = [
            (
                &["components", "schemas"],
                node.get("components").and_then(|c| c.get("schemas")),
            ),
            (&["definitions"], node.get("definitions")),
        ];

        for (segments, section) in sections {
            let Some(schemas) = section.and_then(JsonValue::as_object) else {
                continue;
            };
            debug!(reference, count = schemas.len(), "guessing component schemas");
            for (schema_name, schema_node) in schemas {
                let mut path: Vec<&str> = segments.to_vec();
                path.push(schema_name);
                let schema_reference = child_reference(reference, &path);
                chain.guess_class(schema_node, schema_name, &schema_reference, registry)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guesser::ChainGuesser;
    use crate::registry::Schema;
    use serde_json::json;

    #[test]
    fn test_registers_operations_in_document_order() {
        let root = json!({
            "openapi": "3.0.0",
            "paths": {
                "/pets": {"get": {"operationId": "listPets"}, "post": {}, "parameters": []},
                "/pets/{id}": {"delete": {}}
            }
        });
        let mut registry = Registry::new();
        registry.add_schema(Schema::new("api.yaml", "Api"));

        OpenApiGuesser
            .guess_class(&ChainGuesser::new(), &root, "Api", "api.yaml#", &mut registry)
            .unwrap();

        let operations = registry.schema("api.yaml").unwrap().operations();
        let summary: Vec<(&str, &str)> = operations
            .iter()
            .map(|op| (op.method.as_str(), op.path.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("get", "/pets"), ("post", "/pets"), ("delete", "/pets/{id}")]
        );
        assert_eq!(operations[0].reference, "api.yaml#/paths/~1pets/get");
        assert_eq!(operations[0].operation_id(), Some("listPets"));
    }

    #[test]
    fn test_unknown_schema_is_an_error() {
        let root = json!({"swagger": "2.0", "paths": {"/a": {"get": {}}}});
        let mut registry = Registry::new();
        let err = OpenApiGuesser
            .guess_class(&ChainGuesser::new(), &root, "Api", "other.yaml#", &mut registry)
            .unwrap_err();
        assert!(matches!(err, AppError::Guess(_)));
    }
}
