#![deny(missing_docs)]

//! # Naming
//!
//! Identifier synthesis for properties, classes and operations.
//!
//! - **inflector**: casing, slugging and singularization helpers.
//! - **operation_id**: names from an explicit `operationId`.
//! - **operation_url**: names from method, path and response shape.

pub mod inflector;
pub mod operation_id;
pub mod operation_url;

pub use operation_id::OperationIdNaming;
pub use operation_url::OperationUrlNaming;

use crate::model::OperationGuess;
use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The pair of identifiers derived for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationNames {
    /// Function-style identifier (lower camel case).
    pub function: String,
    /// Type-style identifier for the endpoint (pascal case).
    pub endpoint: String,
}

/// A strategy turning an operation into identifiers.
pub trait OperationNaming {
    /// Function-style identifier, e.g. `getPetById`.
    fn function_name(&self, operation: &OperationGuess) -> String;

    /// Type-style identifier, e.g. `GetPetById`.
    fn endpoint_name(&self, operation: &OperationGuess) -> String;

    /// Both identifiers at once.
    fn names(&self, operation: &OperationGuess) -> OperationNames {
        OperationNames {
            function: self.function_name(operation),
            endpoint: self.endpoint_name(operation),
        }
    }
}

/// Uses the `operationId` when it yields a name, the method and path otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackNaming {
    by_id: OperationIdNaming,
    by_url: OperationUrlNaming,
}

impl FallbackNaming {
    fn has_usable_id(operation: &OperationGuess) -> bool {
        operation
            .operation_id()
            .is_some_and(|id| !inflector::slug_tokens(id).is_empty())
    }
}

impl OperationNaming for FallbackNaming {
    fn function_name(&self, operation: &OperationGuess) -> String {
        if Self::has_usable_id(operation) {
            self.by_id.function_name(operation)
        } else {
            self.by_url.function_name(operation)
        }
    }

    fn endpoint_name(&self, operation: &OperationGuess) -> String {
        if Self::has_usable_id(operation) {
            self.by_id.endpoint_name(operation)
        } else {
            self.by_url.endpoint_name(operation)
        }
    }
}

/// Which operation naming strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationNamingKind {
    /// [`OperationIdNaming`].
    OperationId,
    /// [`OperationUrlNaming`].
    Url,
    /// [`FallbackNaming`].
    #[default]
    Fallback,
}

impl OperationNamingKind {
    /// Instantiates the strategy.
    pub fn build(self) -> Box<dyn OperationNaming> {
        match self {
            OperationNamingKind::OperationId => Box::new(OperationIdNaming),
            OperationNamingKind::Url => Box::new(OperationUrlNaming),
            OperationNamingKind::Fallback => Box::new(FallbackNaming::default()),
        }
    }
}

/// Naming convention for properties and classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naming;

impl Naming {
    /// Base identifier for a property, before deduplication.
    ///
    /// e.g. `pet_id` -> `PetId`, `ID` -> `Id`, `2fa` -> `N2fa`
    pub fn property_name(&self, name: &str) -> String {
        self.identifier(name, "Property")
    }

    /// Class name for a schema name.
    pub fn class_name(&self, name: &str) -> String {
        self.identifier(name, "Model")
    }

    fn identifier(&self, name: &str, fallback: &str) -> String {
        let cased = deunicode::deunicode(name).to_upper_camel_case();
        match cased.chars().next() {
            None => fallback.to_string(),
            Some(first) if first.is_ascii_digit() => format!("N{}", cased),
            Some(_) => cased,
        }
    }
}

/// Assigns identifiers that are unique within one class, compared case-insensitively.
///
/// First come first served: an identifier already handed out is never changed;
/// later clashes get a counter suffix starting at `2`.
#[derive(Debug, Default)]
pub struct IdentifierDeduper {
    seen: HashSet<String>,
}

impl IdentifierDeduper {
    /// Creates an empty deduper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `base`, or `base` + the first free counter.
    pub fn assign(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut counter = 2;
        while self.seen.contains(&candidate.to_lowercase()) {
            candidate = format!("{}{}", base, counter);
            counter += 1;
        }
        self.seen.insert(candidate.to_lowercase());
        candidate
    }
}
