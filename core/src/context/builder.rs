//! # Context Builder
//!
//! Runs the four resolution passes over a registry:
//!
//! 1. parse every document and guess its classes (and operations);
//! 2. guess properties, property types and extension types of every class,
//!    recording the relations between classes;
//! 3. hydrate discriminated unions;
//! 4. prune to the whitelisted paths, when any are set.

use crate::config::GeneratorConfig;
use crate::context::{Context, DiscriminatorResolver, WhitelistPruner};
use crate::error::{AppError, AppResult};
use crate::guesser::{ChainGuesser, SchemaGuesser};
use crate::naming::{IdentifierDeduper, Naming};
use crate::parser::{DocumentParser, FileDocumentParser};
use crate::reference::root_reference;
use crate::registry::Registry;
use indexmap::IndexMap;
use tracing::{debug, info_span};

/// Builds a [`Context`] from a registry of unparsed schemas.
pub struct ContextBuilder {
    parser: Box<dyn DocumentParser>,
    guesser: Box<dyn SchemaGuesser>,
    naming: Naming,
    strict: bool,
}

impl ContextBuilder {
    /// Creates a builder from its collaborators.
    pub fn new(
        parser: Box<dyn DocumentParser>,
        guesser: Box<dyn SchemaGuesser>,
        naming: Naming,
        strict: bool,
    ) -> Self {
        Self {
            parser,
            guesser,
            naming,
            strict,
        }
    }

    /// The file parser and default guesser chain, configured from `config`.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            Box::new(FileDocumentParser::new(config.document_format)),
            Box::new(ChainGuesser::from_config(config)),
            Naming,
            config.strict,
        )
    }

    /// Resolves `registry` into a context.
    ///
    /// The first parser or guesser error aborts the build.
    pub fn create_context(&self, mut registry: Registry) -> AppResult<Context> {
        let span = info_span!("create_context", schemas = registry.origins().len());
        let _enter = span.enter();

        self.guess_classes(&mut registry)?;
        self.guess_members(&mut registry)?;

        let linked = DiscriminatorResolver.hydrate(&mut registry);
        debug!(linked, "hydrated discriminated unions");

        let removed = WhitelistPruner.prune(&mut registry);
        if removed > 0 {
            debug!(removed, "pruned classes outside the whitelist");
        }

        Ok(Context::new(registry, self.strict))
    }

    fn guess_classes(&self, registry: &mut Registry) -> AppResult<()> {
        for origin in registry.origins() {
            let root = self.parser.parse_schema(&origin)?;
            let root_name = registry
                .schema(&origin)
                .map(|schema| schema.root_name().to_string())
                .unwrap_or_default();

            self.guesser
                .guess_class(&root, &root_name, &root_reference(&origin), registry)?;

            if let Some(schema) = registry.schema_mut(&origin) {
                debug!(
                    origin,
                    classes = schema.class_count(),
                    operations = schema.operations().len(),
                    "guessed classes"
                );
                schema.set_parsed(root);
            }
        }
        Ok(())
    }

    fn guess_members(&self, registry: &mut Registry) -> AppResult<()> {
        for origin in registry.origins() {
            let (root_name, references) = registry
                .schema(&origin)
                .map(|schema| (schema.root_name().to_string(), schema.class_references()))
                .unwrap_or_default();

            for reference in references {
                let Some(mut class) = registry.class(&reference).cloned() else {
                    continue;
                };

                let mut deduper = IdentifierDeduper::new();
                let mut properties = self.guesser.guess_properties(
                    &class.object,
                    &root_name,
                    &class.reference,
                    registry,
                )?;
                for property in &mut properties {
                    let base = self.naming.property_name(&property.name);
                    property.identifier = deduper.assign(&base);
                    property.ty = self.guesser.guess_type(
                        &property.object,
                        &property.name,
                        &property.reference,
                        registry,
                    )?;
                }
                class.properties = properties;

                let mut extension_types = IndexMap::new();
                for (pattern, extension) in &class.extensions {
                    let ty = self.guesser.guess_type(
                        &extension.object,
                        pattern,
                        &extension.reference,
                        registry,
                    )?;
                    extension_types.insert(pattern.clone(), ty);
                }
                class.extension_types = extension_types;

                let schema = registry.schema_mut(&origin).ok_or_else(|| {
                    AppError::General(format!("Schema '{}' disappeared during build", origin))
                })?;
                schema.add_class_relations(&class);
                if let Some(slot) = schema.class_mut(&reference) {
                    *slot = class;
                }
            }
        }
        Ok(())
    }
}
