#![deny(missing_docs)]

//! # Document Parsing
//!
//! Turns an origin into a parsed document root. The builder only depends on the
//! [`DocumentParser`] trait; [`FileDocumentParser`] is the default implementation
//! and reads local JSON or YAML files. No network access is performed.

use crate::error::{AppError, AppResult};
use crate::reference::split_reference;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Loads a document root from an origin.
pub trait DocumentParser {
    /// Parses the document at `origin`. Failures abort the whole build.
    fn parse_schema(&self, origin: &str) -> AppResult<JsonValue>;
}

/// Encoding of source documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    /// Pick by file extension: `.json` is JSON, anything else YAML.
    #[default]
    Auto,
    /// Always JSON.
    Json,
    /// Always YAML (a superset of JSON).
    Yaml,
}

impl DocumentFormat {
    fn for_path(self, path: &Path) -> Self {
        match self {
            DocumentFormat::Auto => {
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    DocumentFormat::Json
                } else {
                    DocumentFormat::Yaml
                }
            }
            other => other,
        }
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentParser {
    format: DocumentFormat,
}

impl FileDocumentParser {
    /// Creates a parser decoding documents as `format`.
    pub fn new(format: DocumentFormat) -> Self {
        Self { format }
    }

    /// Decodes `content` read from `path`.
    pub fn decode(&self, path: &Path, content: &str) -> AppResult<JsonValue> {
        let root: JsonValue = match self.format.for_path(path) {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| {
                AppError::Parse(format!("Failed to parse JSON '{}': {}", path.display(), e))
            })?,
            _ => serde_yaml::from_str(content).map_err(|e| {
                AppError::Parse(format!("Failed to parse YAML '{}': {}", path.display(), e))
            })?,
        };

        if !root.is_object() {
            return Err(AppError::Parse(format!(
                "Document '{}' does not have an object at its root",
                path.display()
            )));
        }

        Ok(root)
    }
}

impl DocumentParser for FileDocumentParser {
    fn parse_schema(&self, origin: &str) -> AppResult<JsonValue> {
        let path = origin_to_path(origin)?;
        debug!(origin, path = %path.display(), "parsing document");
        let content = std::fs::read_to_string(&path)?;
        self.decode(&path, &content)
    }
}

fn origin_to_path(origin: &str) -> AppResult<PathBuf> {
    let (document, _) = split_reference(origin);

    // Single-letter schemes are Windows drive letters, not URLs.
    match Url::parse(document) {
        Ok(url) if url.scheme().len() > 1 => {
            if url.scheme() != "file" {
                return Err(AppError::Parse(format!(
                    "Remote documents are not fetched: '{}'",
                    origin
                )));
            }
            url.to_file_path()
                .map_err(|_| AppError::Parse(format!("Invalid file URI '{}'", origin)))
        }
        _ => Ok(PathBuf::from(document)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_parses_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("api.yaml");
        let json_file = dir.path().join("api.json");
        fs::write(&yaml, "openapi: 3.0.0\npaths: {}\n").unwrap();
        fs::write(&json_file, r#"{"swagger": "2.0"}"#).unwrap();

        let parser = FileDocumentParser::default();
        assert_eq!(
            parser.parse_schema(yaml.to_str().unwrap()).unwrap(),
            json!({"openapi": "3.0.0", "paths": {}})
        );
        assert_eq!(
            parser.parse_schema(json_file.to_str().unwrap()).unwrap(),
            json!({"swagger": "2.0"})
        );
    }

    #[test]
    fn test_file_uri_origin() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("api.yaml");
        fs::write(&yaml, "openapi: 3.1.0\n").unwrap();
        let uri = Url::from_file_path(&yaml).unwrap().to_string();

        let root = FileDocumentParser::default().parse_schema(&uri).unwrap();
        assert_eq!(root["openapi"], json!("3.1.0"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FileDocumentParser::default()
            .parse_schema("/definitely/not/here.yaml")
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_remote_origin_rejected() {
        let err = FileDocumentParser::default()
            .parse_schema("https://example.com/api.yaml")
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_scalar_root_rejected() {
        let parser = FileDocumentParser::new(DocumentFormat::Yaml);
        let err = parser.decode(Path::new("x.yaml"), "just a string").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
