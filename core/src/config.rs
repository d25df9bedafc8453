#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Settings for one generation run, loadable from a YAML or JSON file with
//! kebab-case keys. Every key is optional except `openapi-file`.
//!
//! ```yaml
//! openapi-file: [petstore.yaml]
//! root-name: PetStore
//! whitelisted-paths: ["/pets"]
//! operation-naming: url
//! ```

use crate::error::{AppError, AppResult};
use crate::guesser::{DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_CLASS};
use crate::naming::OperationNamingKind;
use crate::parser::DocumentFormat;
use crate::registry::Registry;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

fn default_root_name() -> String {
    "Api".to_string()
}

fn default_strict() -> bool {
    true
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_date_time_class() -> String {
    DEFAULT_DATE_TIME_CLASS.to_string()
}

/// Accepts either a single origin or a list of them.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(origin) => vec![origin],
        OneOrMany::Many(origins) => origins,
    })
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Origins of the documents to generate from.
    #[serde(default, deserialize_with = "one_or_many")]
    pub openapi_file: Vec<String>,

    /// Name given to each document's root.
    #[serde(default = "default_root_name")]
    pub root_name: String,

    /// Carried through to the context for the emitter.
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Output format of date-time values.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Input format of date-time values, when it differs from the output.
    #[serde(default)]
    pub date_input_format: Option<String>,

    /// Whether emitters should type date-times by interface.
    #[serde(default)]
    pub date_prefer_interface: Option<bool>,

    /// Name of the scalar wrapper date-times decode into.
    #[serde(default = "default_date_time_class")]
    pub date_time_class: String,

    /// Only generate what these paths need. Empty means everything.
    #[serde(default)]
    pub whitelisted_paths: Vec<String>,

    /// Operation naming strategy.
    #[serde(default)]
    pub operation_naming: OperationNamingKind,

    /// How documents are decoded.
    #[serde(default)]
    pub document_format: DocumentFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            openapi_file: Vec::new(),
            root_name: default_root_name(),
            strict: default_strict(),
            date_format: default_date_format(),
            date_input_format: None,
            date_prefer_interface: None,
            date_time_class: default_date_time_class(),
            whitelisted_paths: Vec::new(),
            operation_naming: OperationNamingKind::default(),
            document_format: DocumentFormat::default(),
        }
    }
}

impl GeneratorConfig {
    /// Reads a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Decodes configuration from YAML (or JSON, which YAML accepts).
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Checks the settings that have no usable default.
    pub fn validate(&self) -> AppResult<()> {
        if self.openapi_file.is_empty() {
            return Err(AppError::Config(
                "At least one `openapi-file` is required".to_string(),
            ));
        }
        if self.openapi_file.iter().any(|origin| origin.trim().is_empty()) {
            return Err(AppError::Config("`openapi-file` entries cannot be empty".to_string()));
        }
        Ok(())
    }

    /// A registry with one schema per configured origin and the whitelist applied.
    pub fn build_registry(&self) -> AppResult<Registry> {
        self.validate()?;
        let mut registry = Registry::from_origins(self.openapi_file.iter().cloned(), &self.root_name);
        registry.set_whitelisted_paths(self.whitelisted_paths.iter().cloned());
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_from_minimal_yaml() {
        let config = GeneratorConfig::from_yaml_str("openapi-file: api.yaml").unwrap();
        assert_eq!(
            config,
            GeneratorConfig {
                openapi_file: vec!["api.yaml".into()],
                ..GeneratorConfig::default()
            }
        );
        assert!(config.strict);
        assert_eq!(config.root_name, "Api");
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
openapi-file: [a.yaml, b.json]
root-name: Store
strict: false
date-format: "%Y-%m-%d"
date-prefer-interface: true
whitelisted-paths: ["/pets"]
operation-naming: operation-id
document-format: json
"#;
        let config = GeneratorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.openapi_file, vec!["a.yaml", "b.json"]);
        assert_eq!(config.root_name, "Store");
        assert!(!config.strict);
        assert_eq!(config.date_prefer_interface, Some(true));
        assert_eq!(config.operation_naming, OperationNamingKind::OperationId);
        assert_eq!(config.document_format, DocumentFormat::Json);
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = GeneratorConfig::from_yaml_str("openapi-file: a.yaml\nroot: X").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_validate_requires_origin() {
        let err = GeneratorConfig::default().validate().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_build_registry() {
        let config = GeneratorConfig {
            openapi_file: vec!["a.yaml".into(), "b.yaml".into()],
            root_name: "Store".into(),
            whitelisted_paths: vec!["/pets".into()],
            ..GeneratorConfig::default()
        };
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.origins(), vec!["a.yaml", "b.yaml"]);
        assert_eq!(registry.schema("b.yaml").unwrap().root_name(), "Store");
        assert!(registry.is_whitelisted("/pets"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"openapi-file\": \"x.json\", \"root-name\": \"X\"}}").unwrap();
        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.openapi_file, vec!["x.json"]);
        assert_eq!(config.root_name, "X");
    }
}
