#![deny(missing_docs)]

//! # Guessers
//!
//! A guesser looks at one document node and decides what it is: a class to
//! generate, a list of properties, or a resolved type. The context builder only
//! talks to the [`SchemaGuesser`] seam; [`ChainGuesser`] implements it by asking
//! an ordered list of small, pluggable guessers.
//!
//! - **openapi**: document roots (operations and component schemas).
//! - **class**: object schemas, discriminated unions, nested inline objects.
//! - **properties**: `properties` and `allOf` merging.
//! - **types**: `$ref`, classes, unions, arrays, maps, scalars.
//! - **date_time**: date-time strings bound to a scalar wrapper.

pub mod class;
pub mod date_time;
pub mod openapi;
pub mod properties;
pub mod types;

pub use class::SchemaClassGuesser;
pub use date_time::{
    DateTimeGuesser, DateTimeTypeGuesser, DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_CLASS,
};
pub use openapi::OpenApiGuesser;
pub use properties::{AllOfPropertiesGuesser, ObjectPropertiesGuesser};
pub use types::{
    ArrayGuesser, MapGuesser, MultipleGuesser, ObjectGuesser, ReferenceGuesser, SimpleTypeGuesser,
};

use crate::config::GeneratorConfig;
use crate::error::AppResult;
use crate::model::{Property, Type};
use crate::naming::Naming;
use crate::registry::Registry;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use tracing::trace;

/// The capability the context builder needs from its guessers.
pub trait SchemaGuesser {
    /// Discovers classes (and operations) under `node`, registering them on `registry`.
    fn guess_class(
        &self,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &mut Registry,
    ) -> AppResult<()>;

    /// Lists the properties of the class guessed from `node`.
    fn guess_properties(
        &self,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Vec<Property>>;

    /// Resolves the type of a property or extension node.
    fn guess_type(
        &self,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type>;
}

/// Registers classes found under a node.
pub trait ClassGuesser {
    /// Whether this guesser handles `node`.
    fn supports(&self, node: &JsonValue) -> bool;

    /// Registers classes for `node`. `chain` is used to recurse into children.
    fn guess_class(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &mut Registry,
    ) -> AppResult<()>;
}

/// Extracts properties from a class node.
pub trait PropertiesGuesser {
    /// Whether this guesser handles `node`.
    fn supports(&self, node: &JsonValue) -> bool;

    /// Lists properties in source order.
    fn guess_properties(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Vec<Property>>;
}

/// Resolves the type of a node.
pub trait TypeGuesser {
    /// Whether this guesser handles `node` found at `reference`.
    fn supports(&self, node: &JsonValue, reference: &str, registry: &Registry) -> bool;

    /// Resolves the type.
    fn guess_type(
        &self,
        chain: &dyn SchemaGuesser,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type>;
}

/// Ordered chains of class, properties and type guessers.
///
/// - every supporting class guesser runs;
/// - properties from every supporting properties guesser are merged, the first
///   property of a given name wins;
/// - the first supporting type guesser decides, [`Type::Mixed`] otherwise.
#[derive(Default)]
pub struct ChainGuesser {
    class_guessers: Vec<Box<dyn ClassGuesser>>,
    properties_guessers: Vec<Box<dyn PropertiesGuesser>>,
    type_guessers: Vec<Box<dyn TypeGuesser>>,
}

impl ChainGuesser {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default chain for OpenAPI 2 and 3 documents.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let naming = Naming;
        let date_time = DateTimeGuesser::new(
            config.date_time_class.clone(),
            config.date_format.clone(),
            config.date_input_format.clone(),
            config.date_prefer_interface,
        );

        Self::new()
            .with_class_guesser(OpenApiGuesser)
            .with_class_guesser(SchemaClassGuesser::new(naming))
            .with_properties_guesser(ObjectPropertiesGuesser)
            .with_properties_guesser(AllOfPropertiesGuesser::default())
            .with_type_guesser(ReferenceGuesser::default())
            .with_type_guesser(ObjectGuesser)
            .with_type_guesser(date_time)
            .with_type_guesser(MultipleGuesser)
            .with_type_guesser(ArrayGuesser)
            .with_type_guesser(MapGuesser)
            .with_type_guesser(SimpleTypeGuesser)
    }

    /// Appends a class guesser.
    pub fn with_class_guesser(mut self, guesser: impl ClassGuesser + 'static) -> Self {
        self.class_guessers.push(Box::new(guesser));
        self
    }

    /// Appends a properties guesser.
    pub fn with_properties_guesser(mut self, guesser: impl PropertiesGuesser + 'static) -> Self {
        self.properties_guessers.push(Box::new(guesser));
        self
    }

    /// Appends a type guesser.
    pub fn with_type_guesser(mut self, guesser: impl TypeGuesser + 'static) -> Self {
        self.type_guessers.push(Box::new(guesser));
        self
    }
}

impl SchemaGuesser for ChainGuesser {
    fn guess_class(
        &self,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &mut Registry,
    ) -> AppResult<()> {
        for guesser in &self.class_guessers {
            if guesser.supports(node) {
                guesser.guess_class(self, node, name, reference, registry)?;
            }
        }
        Ok(())
    }

    fn guess_properties(
        &self,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Vec<Property>> {
        let mut properties = Vec::new();
        let mut names = HashSet::new();
        for guesser in &self.properties_guessers {
            if !guesser.supports(node) {
                continue;
            }
            for property in guesser.guess_properties(self, node, name, reference, registry)? {
                if names.insert(property.name.clone()) {
                    properties.push(property);
                }
            }
        }
        Ok(properties)
    }

    fn guess_type(
        &self,
        node: &JsonValue,
        name: &str,
        reference: &str,
        registry: &Registry,
    ) -> AppResult<Type> {
        for guesser in &self.type_guessers {
            if guesser.supports(node, reference, registry) {
                return guesser.guess_type(self, node, name, reference, registry);
            }
        }
        trace!(reference, "no type guesser matched, falling back to mixed");
        Ok(Type::Mixed)
    }
}

/// The `type` keyword when it is a single string.
pub(crate) fn type_keyword(node: &JsonValue) -> Option<&str> {
    node.get("type").and_then(JsonValue::as_str)
}

/// Whether `node` carries a `$ref`.
pub(crate) fn is_reference(node: &JsonValue) -> bool {
    node.get("$ref").and_then(JsonValue::as_str).is_some()
}
