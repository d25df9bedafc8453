#![deny(missing_docs)]

//! # Operation Url Naming
//!
//! Synthesizes identifiers from the HTTP method, the path template and the shape
//! of the `200` response, for operations without a usable `operationId`.
//!
//! e.g. `GET /pets/{petId}.json` returning one object -> `getPetByPetId`

use crate::model::OperationGuess;
use crate::naming::inflector::{camelize, capitalize, classify, singularize};
use crate::naming::OperationNaming;
use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

/// Literal extensions dropped when they follow a `.` separator.
pub const FORBIDDEN_EXTENSIONS: &[&str] = &[".json", ".php", ".asp"];

/// Names operations after their method and path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationUrlNaming;

impl OperationUrlNaming {
    /// The shared base of the function and endpoint names, e.g. `getPetByPetId`.
    pub fn unique_name(&self, operation: &OperationGuess) -> String {
        let prefix = operation.method.to_lowercase();
        let should_singularize = !returns_array(operation);

        let parts = path_parts(&operation.path);
        let mut names: Vec<String> = Vec::with_capacity(parts.len());
        let mut last_literal_index = None;

        for part in parts {
            match part {
                PathPart::Parameters(parameters) => {
                    names.push(
                        parameters
                            .iter()
                            .map(|parameter| format!("By{}", pascal_parameter(parameter)))
                            .collect(),
                    );
                }
                PathPart::Literal(literal) => {
                    names.push(capitalize(&literal));
                    last_literal_index = Some(names.len() - 1);
                }
            }
        }

        if let Some(index) = last_literal_index.filter(|_| should_singularize) {
            names[index] = singularize(&names[index]);
        }

        format!("{}{}", prefix, capitalize(&names.concat()))
    }
}

impl OperationNaming for OperationUrlNaming {
    fn function_name(&self, operation: &OperationGuess) -> String {
        camelize(&self.unique_name(operation))
    }

    fn endpoint_name(&self, operation: &OperationGuess) -> String {
        classify(&self.unique_name(operation))
    }
}

/// A path token after extension stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathPart {
    /// A token with one or more `{name}` placeholders (their names, in order).
    Parameters(Vec<String>),
    /// A literal segment.
    Literal(String),
}

fn path_token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?P<separator>[^a-zA-Z0-9_{}]+)(?P<part>[a-zA-Z0-9_{}]*)")
            .expect("Invalid regex")
    })
}

fn parameter_regex() -> &'static Regex {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    PARAM_RE.get_or_init(|| Regex::new(r"\{(?P<parameter>[^{}]+)\}").expect("Invalid regex"))
}

/// Splits a path template into literal and parameter tokens.
///
/// A token only starts after a separator, so text before the first separator is
/// ignored. Empty tokens (trailing `/`) are kept as empty literals.
fn path_parts(path: &str) -> Vec<PathPart> {
    let mut parts = Vec::new();

    for captures in path_token_regex().captures_iter(path) {
        let separator = &captures["separator"];
        let part = &captures["part"];

        if separator == "." {
            let extension = format!(".{}", part.to_lowercase());
            if FORBIDDEN_EXTENSIONS.contains(&extension.as_str()) {
                continue;
            }
        }

        let parameters: Vec<String> = parameter_regex()
            .captures_iter(part)
            .map(|c| c["parameter"].to_string())
            .collect();

        if parameters.is_empty() {
            parts.push(PathPart::Literal(part.to_string()));
        } else {
            parts.push(PathPart::Parameters(parameters));
        }
    }

    parts
}

/// PascalCases a parameter name, treating `_` and `.` as word boundaries.
///
/// e.g. `pet_id` -> `PetId`, `owner.name` -> `OwnerName`
fn pascal_parameter(parameter: &str) -> String {
    let mut out = String::with_capacity(parameter.len());
    let mut upper_next = true;
    for c in parameter.chars() {
        if c == '_' || c == '.' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether the `200` response is an array, in either response encoding:
/// a `schema` directly on the response (Swagger 2), or the first entry of a
/// `content` map (OpenAPI 3).
fn returns_array(operation: &OperationGuess) -> bool {
    let Some(response) = operation.success_response() else {
        return false;
    };

    if response.get("schema").is_some_and(is_array_schema) {
        return true;
    }

    response
        .get("content")
        .and_then(JsonValue::as_object)
        .and_then(|content| content.values().next())
        .and_then(|media| media.get("schema"))
        .is_some_and(is_array_schema)
}

fn is_array_schema(schema: &JsonValue) -> bool {
    schema.get("type").and_then(JsonValue::as_str) == Some("array")
}
