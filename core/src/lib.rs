#![deny(missing_docs)]

//! # Schemagen Core
//!
//! Resolves OpenAPI documents into a model of classes, properties and types
//! ready for a code emitter, and derives identifiers for operations.

/// Generator configuration.
pub mod config;

/// Resolution passes and the resolved context.
pub mod context;

/// Shared error types.
pub mod error;

/// Pluggable class, properties and type guessers.
pub mod guesser;

/// Classes, properties, types and operations.
pub mod model;

/// Identifier synthesis.
pub mod naming;

/// Document loading.
pub mod parser;

/// Reference id and JSON pointer helpers.
pub mod reference;

/// Schemas of one generation run.
pub mod registry;

pub use config::GeneratorConfig;
pub use context::{Context, ContextBuilder};
pub use error::{AppError, AppResult};
pub use guesser::{ChainGuesser, SchemaGuesser};
pub use model::{Class, ClassKind, OperationGuess, Property, Type};
pub use naming::{OperationNames, OperationNaming, OperationNamingKind};
pub use parser::{DocumentFormat, DocumentParser, FileDocumentParser};
pub use registry::{Registry, Schema};
