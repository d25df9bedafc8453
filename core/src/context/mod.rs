#![deny(missing_docs)]

//! # Context
//!
//! The resolved model handed to an emitter, and the passes that build it.
//!
//! - **builder**: the four-pass [`ContextBuilder`].
//! - **discriminator**: links union children back to their union.
//! - **whitelist**: drops classes no whitelisted operation reaches.

pub mod builder;
pub mod discriminator;
pub mod whitelist;

pub use builder::ContextBuilder;
pub use discriminator::DiscriminatorResolver;
pub use whitelist::WhitelistPruner;

use crate::registry::Registry;
use serde::Serialize;

/// A fully resolved registry, read-only once built.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    registry: Registry,
    strict: bool,
}

impl Context {
    /// Wraps a resolved registry.
    pub fn new(registry: Registry, strict: bool) -> Self {
        Self { registry, strict }
    }

    /// The resolved registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Whether emitters should generate strict (validating) code.
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}
