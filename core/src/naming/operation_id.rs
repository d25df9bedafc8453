//! # Operation Id Naming
//!
//! Derives identifiers from the operation's declared `operationId`.

use crate::model::OperationGuess;
use crate::naming::inflector::{capitalize, slug_tokens, uncapitalize};
use crate::naming::OperationNaming;

/// Names operations after their `operationId`.
///
/// The id is slugged to ASCII tokens, keeping their case; the function name
/// joins them in lower camel case and the endpoint name in pascal case. Colliding ids are not
/// deduplicated here.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationIdNaming;

impl OperationIdNaming {
    fn tokens(operation: &OperationGuess) -> Vec<String> {
        slug_tokens(operation.operation_id().unwrap_or_default())
    }
}

impl OperationNaming for OperationIdNaming {
    fn function_name(&self, operation: &OperationGuess) -> String {
        let tokens = Self::tokens(operation);
        let mut iter = tokens.iter();
        let mut out = iter.next().map(|token| uncapitalize(token)).unwrap_or_default();
        out.extend(iter.map(|token| capitalize(token)));
        out
    }

    fn endpoint_name(&self, operation: &OperationGuess) -> String {
        Self::tokens(operation)
            .iter()
            .map(|token| capitalize(token))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op(operation_id: &str) -> OperationGuess {
        OperationGuess::new(
            "get",
            "/pets",
            "d#/paths/~1pets/get",
            json!({"operationId": operation_id}),
        )
    }

    #[test]
    fn test_camel_and_pascal_join() {
        let naming = OperationIdNaming;
        let names = naming.names(&op("list-pets_by status"));
        assert_eq!(names.function, "listPetsByStatus");
        assert_eq!(names.endpoint, "ListPetsByStatus");
    }

    #[test]
    fn test_camel_case_ids_survive() {
        let names = OperationIdNaming.names(&op("findPetsByTags"));
        assert_eq!(names.function, "findPetsByTags");
        assert_eq!(names.endpoint, "FindPetsByTags");
    }

    #[test]
    fn test_acronyms_keep_their_case() {
        let names = OperationIdNaming.names(&op("getHTTPResponse"));
        assert_eq!(names.function, "getHTTPResponse");
        assert_eq!(names.endpoint, "GetHTTPResponse");

        let names = OperationIdNaming.names(&op("Get_URL"));
        assert_eq!(names.function, "getURL");
        assert_eq!(names.endpoint, "GetURL");
    }

    #[test]
    fn test_transliterates_non_ascii() {
        let names = OperationIdNaming.names(&op("créer_élève"));
        assert_eq!(names.function, "creerEleve");
        assert_eq!(names.endpoint, "CreerEleve");
    }

    #[test]
    fn test_missing_id_yields_empty_names() {
        let operation = OperationGuess::new("get", "/pets", "d#", json!({}));
        assert_eq!(OperationIdNaming.function_name(&operation), "");
        assert_eq!(OperationIdNaming.endpoint_name(&operation), "");
    }
}
