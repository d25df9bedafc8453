//! # Date-Time Guessers
//!
//! `type: string, format: date-time` nodes become [`Type::DateTime`].

use crate::error::AppResult;
use crate::guesser::{type_keyword, SchemaGuesser, TypeGuesser};
use crate::model::{DateTimeType, Type};
use crate::registry::Registry;
use serde_json::Value as JsonValue;

/// RFC 3339 timestamp, the default output format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Wrapper name used when none is configured.
pub const DEFAULT_DATE_TIME_CLASS: &str = "DateTime";

/// Base date-time guesser: recognizes the node and carries the formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeTypeGuesser {
    output_format: String,
    input_format: Option<String>,
    prefer_interface: Option<bool>,
}

impl Default for DateTimeTypeGuesser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, None, None)
    }
}

impl DateTimeTypeGuesser {
    /// Creates a guesser writing values as `output_format`.
    pub fn new(
        output_format: impl Into<String>,
        input_format: Option<String>,
        prefer_interface: Option<bool>,
    ) -> Self {
        Self {
            output_format: output_format.into(),
            input_format,
            prefer_interface,
        }
    }

    /// Whether `node` is a date-time string.
    pub fn supports_node(&self, node: &JsonValue) -> bool {
        type_keyword(node) == Some("string")
            && node.get("format").and_then(JsonValue::as_str) == Some("date-time")
    }

    /// The date-time type for values decoded into `class`.
    pub fn date_time_type(&self, class: &str) -> Type {
        Type::DateTime(DateTimeType {
            class: class.to_string(),
            output_format: self.output_format.clone(),
            input_format: self.input_format.clone(),
            prefer_interface: self.prefer_interface,
        })
    }
}

/// A [`DateTimeTypeGuesser`] bound to one generated scalar wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeGuesser {
    schema_class: String,
    base: DateTimeTypeGuesser,
}

impl Default for DateTimeGuesser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_TIME_CLASS, DEFAULT_DATE_FORMAT, None, None)
    }
}

impl DateTimeGuesser {
    /// Binds the wrapper `schema_class` and the formats.
    pub fn new(
        schema_class: impl Into<String>,
        output_format: impl Into<String>,
        input_format: Option<String>,
        prefer_interface: Option<bool>,
    ) -> Self {
        Self {
            schema_class: schema_class.into(),
            base: DateTimeTypeGuesser::new(output_format, input_format, prefer_interface),
        }
    }

    /// The wrapper name values are decoded into.
    pub fn schema_class(&self) -> &str {
        &self.schema_class
    }
}

impl TypeGuesser for DateTimeGuesser {
    fn supports(&self, node: &JsonValue, _reference: &str, _registry: &Registry) -> bool {
        self.base.supports_node(node)
    }

    fn guess_type(
        &self,
        _chain: &dyn SchemaGuesser,
        _node: &JsonValue,
        _name: &str,
        _reference: &str,
        _registry: &Registry,
    ) -> AppResult<Type> {
        Ok(self.base.date_time_type(&self.schema_class))
    }
}
