#![deny(missing_docs)]

//! # Resolve Command
//!
//! Loads the configuration, runs the context builder and prints the resolved
//! classes and named operations as JSON.

use std::io::Write;
use std::path::PathBuf;

use schemagen_core::{
    Class, Context, ContextBuilder, GeneratorConfig, OperationNames, OperationNaming,
    OperationNamingKind,
};
use serde::Serialize;
use tracing::info;

use crate::error::CliResult;

/// Operation naming strategies selectable on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingArg {
    /// From the explicit `operationId`.
    OperationId,
    /// From method, path and response shape.
    Url,
    /// `operationId` when present, the URL otherwise.
    Fallback,
}

impl From<NamingArg> for OperationNamingKind {
    fn from(arg: NamingArg) -> Self {
        match arg {
            NamingArg::OperationId => OperationNamingKind::OperationId,
            NamingArg::Url => OperationNamingKind::Url,
            NamingArg::Fallback => OperationNamingKind::Fallback,
        }
    }
}

/// Arguments for the resolve command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Configuration file (YAML or JSON, kebab-case keys).
    #[clap(long, env = "SCHEMAGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Document to resolve. Repeat for several; replaces the configured list.
    #[clap(long = "openapi-file", env = "SCHEMAGEN_OPENAPI_FILE", value_delimiter = ',')]
    pub openapi_files: Vec<String>,

    /// Only keep what these paths need. Repeat for several.
    #[clap(long = "whitelist", value_delimiter = ',')]
    pub whitelisted_paths: Vec<String>,

    /// Root name of each document.
    #[clap(long)]
    pub root_name: Option<String>,

    /// Strict mode carried to the emitter.
    #[clap(long)]
    pub strict: Option<bool>,

    /// Operation naming strategy.
    #[clap(long, value_enum)]
    pub naming: Option<NamingArg>,

    /// Pretty-print the output.
    #[clap(long)]
    pub pretty: bool,
}

impl ResolveArgs {
    /// Configuration file values, overridden by flags.
    pub fn load_config(&self) -> CliResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        if !self.openapi_files.is_empty() {
            config.openapi_file = self.openapi_files.clone();
        }
        if !self.whitelisted_paths.is_empty() {
            config.whitelisted_paths = self.whitelisted_paths.clone();
        }
        if let Some(root_name) = &self.root_name {
            config.root_name = root_name.clone();
        }
        if let Some(strict) = self.strict {
            config.strict = strict;
        }
        if let Some(naming) = self.naming {
            config.operation_naming = naming.into();
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct OperationReport<'a> {
    method: &'a str,
    path: &'a str,
    reference: &'a str,
    #[serde(flatten)]
    names: OperationNames,
}

#[derive(Debug, Serialize)]
struct SchemaReport<'a> {
    origin: &'a str,
    classes: Vec<&'a Class>,
    operations: Vec<OperationReport<'a>>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    strict: bool,
    schemas: Vec<SchemaReport<'a>>,
}

fn report<'a>(context: &'a Context, naming: &dyn OperationNaming) -> Report<'a> {
    let schemas = context
        .registry()
        .schemas()
        .map(|schema| SchemaReport {
            origin: schema.origin(),
            classes: schema.classes().collect(),
            operations: schema
                .operations()
                .iter()
                .filter(|op| {
                    let whitelist = context.registry().whitelisted_paths();
                    whitelist.is_empty() || whitelist.contains(&op.path)
                })
                .map(|op| OperationReport {
                    method: &op.method,
                    path: &op.path,
                    reference: &op.reference,
                    names: naming.names(op),
                })
                .collect(),
        })
        .collect();

    Report {
        strict: context.is_strict(),
        schemas,
    }
}

/// Executes the resolve command, writing the report to `out`.
pub fn execute(args: &ResolveArgs, out: &mut impl Write) -> CliResult<()> {
    let config = args.load_config()?;
    let registry = config.build_registry()?;
    info!(documents = config.openapi_file.len(), "resolving");

    let context = ContextBuilder::from_config(&config).create_context(registry)?;
    let naming = config.operation_naming.build();
    let report = report(&context, naming.as_ref());

    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, &report)?;
    } else {
        serde_json::to_writer(&mut *out, &report)?;
    }
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pretty_assertions::assert_eq;
    use schemagen_core::AppError;
    use serde_json::Value as JsonValue;
    use std::fs;
    use tempfile::tempdir;

    const DOC: &str = r##"
openapi: 3.0.0
paths:
  /pets/{petId}:
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
  /stores:
    get:
      operationId: listStores
      responses:
        "200":
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Store"
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
    Store:
      type: object
      properties:
        id:
          type: integer
"##;

    fn run(args: &ResolveArgs) -> JsonValue {
        let mut out = Vec::new();
        execute(args, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_resolve_prints_classes_and_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("api.yaml");
        fs::write(&path, DOC).unwrap();

        let output = run(&ResolveArgs {
            openapi_files: vec![path.to_string_lossy().to_string()],
            ..ResolveArgs::default()
        });

        let schema = &output["schemas"][0];
        let classes: Vec<&str> = schema["classes"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["name"].as_str())
            .collect();
        let functions: Vec<&str> = schema["operations"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|op| op["function"].as_str())
            .collect();

        assert_eq!(output["strict"], JsonValue::Bool(true));
        assert_eq!(classes, vec!["Pet", "Store"]);
        assert_eq!(functions, vec!["getPetByPetId", "listStores"]);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("api.yaml");
        fs::write(&doc, DOC).unwrap();
        let config = dir.path().join("schemagen.yaml");
        fs::write(
            &config,
            format!("openapi-file: {}\nstrict: true\n", doc.to_string_lossy()),
        )
        .unwrap();

        let output = run(&ResolveArgs {
            config: Some(config),
            whitelisted_paths: vec!["/stores".into()],
            strict: Some(false),
            naming: Some(NamingArg::Url),
            ..ResolveArgs::default()
        });

        let schema = &output["schemas"][0];
        assert_eq!(output["strict"], JsonValue::Bool(false));
        assert_eq!(schema["classes"].as_array().unwrap().len(), 1);
        assert_eq!(schema["classes"][0]["name"], "Store");
        assert_eq!(schema["operations"][0]["function"], "getStore");
        assert_eq!(schema["operations"][0]["endpoint"], "GetStore");
    }

    #[test]
    fn test_missing_documents_is_config_error() {
        let err = ResolveArgs::default().load_config().unwrap_err();
        assert!(matches!(err, CliError::Core(AppError::Config(_))));
    }
}
