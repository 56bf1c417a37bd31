//! Parser for Release Manager documents (YAML/TOML/JSON formats).
//!
//! This crate reads environment definitions, release logs, configuration
//! snapshots and any other contract shape from files or strings, and decodes
//! the values of the `release-manager.io/*` catalog annotations.
//!
//! # Example
//!
//! ```rust
//! use release_manager_parser::{parse_yaml, EnvironmentsDocument};
//!
//! let yaml = r#"
//! environments:
//!   - name: staging
//!     tier: staging
//!     promotesTo: production
//!   - name: production
//!     tier: production
//!     providers:
//!       - type: kubernetes
//!         cluster: prod-eu-1
//! "#;
//!
//! let doc: EnvironmentsDocument = parse_yaml(yaml).expect("Failed to parse environments");
//! assert_eq!(doc.environments.len(), 2);
//! ```

mod annotations;

pub use annotations::*;

use release_manager_core::Environment;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during document parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Annotation value could not be interpreted
    #[error("Invalid value for annotation '{key}': {message}")]
    InvalidAnnotation {
        /// Annotation key
        key: String,
        /// What was wrong with the value
        message: String,
    },
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// File layout for environment definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentsDocument {
    pub environments: Vec<Environment>,
}

/// Parse a document from a YAML string.
///
/// JSON is valid YAML, so this also accepts JSON input.
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_yaml_ng::from_str(content)?)
}

/// Parse a document from a TOML string.
///
/// # Example
///
/// ```rust
/// use release_manager_parser::{parse_toml, EnvironmentsDocument};
///
/// let toml = r#"
/// [[environments]]
/// name = "dev"
/// tier = "development"
/// promotesTo = "staging"
///
/// [[environments.providers]]
/// type = "aws"
/// accountId = "123456789012"
/// region = "eu-west-1"
/// "#;
///
/// let doc: EnvironmentsDocument = parse_toml(toml).unwrap();
/// assert_eq!(doc.environments[0].providers.len(), 1);
/// ```
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T> {
    toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
}

/// Parse a document from a JSON string.
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a document in the given format.
pub fn parse_str<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
    match format {
        DocumentFormat::Yaml => parse_yaml(content),
        DocumentFormat::Toml => parse_toml(content),
        DocumentFormat::Json => parse_json(content),
    }
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `DocumentFormat::Yaml`
/// * `.toml` → `DocumentFormat::Toml`
/// * `.json` → `DocumentFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<DocumentFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(DocumentFormat::Yaml),
        "toml" => Ok(DocumentFormat::Toml),
        "json" => Ok(DocumentFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a document from a file with automatic format detection.
///
/// ```no_run
/// use release_manager_core::Configuration;
/// use release_manager_parser::parse_file;
/// use std::path::Path;
///
/// let config: Configuration = parse_file(Path::new("snapshots/staging.json")).unwrap();
/// println!("Captured {} values", config.values.len());
/// ```
pub fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "Parsing document");
    parse_str(&content, format)
}

/// Parse environment definitions from a file.
pub fn parse_environments_file(path: &Path) -> Result<Vec<Environment>> {
    let doc: EnvironmentsDocument = parse_file(path)?;
    Ok(doc.environments)
}
