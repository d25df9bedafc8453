#![deny(missing_docs)]

//! # Model
//!
//! Intermediate representation built by the context builder and handed to the emitter.

pub mod class;
pub mod operation;
pub mod property;
pub mod types;

pub use class::{Class, ClassKind, ExtensionObject};
pub use operation::OperationGuess;
pub use property::Property;
pub use types::{DateTimeType, ScalarKind, Type};
