//! Configuration snapshot and schema checks.

use crate::ViolationError;
use release_manager_core::{ConfigSchemaEntry, Configuration};
use std::collections::HashSet;

/// Validates configuration snapshots and tracked-key schemas.
pub struct ConfigurationValidator;

impl ConfigurationValidator {
    /// Creates a new configuration validator.
    pub fn new() -> Self {
        Self
    }

    /// Checks a snapshot for duplicate keys and unmasked secrets.
    ///
    /// Unmasked secrets are expected inside the backend and only warned about.
    pub fn validate(&self, configuration: &Configuration) -> Vec<ViolationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for value in &configuration.values {
            if value.key.is_empty() {
                errors.push(ViolationError::empty_field("ConfigValue", "key"));
            }
            if !seen.insert(value.key.as_str()) {
                errors.push(ViolationError::duplicate_key("configuration", &value.key));
            }
            if value.secret && !value.is_masked() {
                errors.push(ViolationError::UnmaskedSecret {
                    key: value.key.clone(),
                });
            }
        }

        errors
    }

    /// Checks a schema for duplicate keys and paths that ignore the environment.
    pub fn validate_schema(&self, entries: &[ConfigSchemaEntry]) -> Vec<ViolationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for entry in entries {
            if entry.key.is_empty() {
                errors.push(ViolationError::empty_field("ConfigSchemaEntry", "key"));
            }
            if entry.path.is_empty() {
                errors.push(ViolationError::empty_field(
                    format!("ConfigSchemaEntry '{}'", entry.key),
                    "path",
                ));
            } else if !entry.has_env_placeholder() {
                errors.push(ViolationError::MissingEnvPlaceholder {
                    key: entry.key.clone(),
                });
            }
            if !seen.insert(entry.key.as_str()) {
                errors.push(ViolationError::duplicate_key("config schema", &entry.key));
            }
        }

        errors
    }
}

impl Default for ConfigurationValidator {
    fn default() -> Self {
        Self::new()
    }
}
