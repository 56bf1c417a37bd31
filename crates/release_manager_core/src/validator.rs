//! Validation traits and types for release manager contracts.
//!
//! The shapes in this crate do not validate themselves beyond what decoding
//! enforces. Implementations of [`ContractValidator`] check the cross-field
//! invariants (denormalized counts, derived flags, pagination bounds) and
//! report the outcome as a [`ValidationReport`].

use crate::ContractDocument;
use serde::Serialize;
use std::collections::HashMap;

/// Core trait for validating contract documents.
///
/// # Example
///
/// ```rust
/// use release_manager_core::{ContractDocument, ContractValidator, ValidationContext, ValidationReport};
///
/// struct AcceptAll;
///
/// impl ContractValidator for AcceptAll {
///     fn validate(&self, _document: &ContractDocument, _context: &ValidationContext) -> ValidationReport {
///         ValidationReport::success()
///     }
/// }
/// ```
pub trait ContractValidator: Send + Sync {
    /// Validates one document.
    fn validate(&self, document: &ContractDocument, context: &ValidationContext)
    -> ValidationReport;

    /// Validates several documents into a single report.
    fn validate_all(
        &self,
        documents: &[ContractDocument],
        context: &ValidationContext,
    ) -> ValidationReport {
        let mut combined = ValidationReport::success();
        for document in documents {
            combined.merge(self.validate(document, context));
        }
        combined
    }
}

/// Context for validation operations.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext {
    /// Whether warnings fail validation
    pub strict: bool,

    /// Additional metadata for the validation
    pub metadata: HashMap<String, String>,
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict validation mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Adds metadata to the context.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Report of validation results.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub passed: bool,

    /// List of errors encountered
    pub errors: Vec<String>,

    /// List of warnings
    pub warnings: Vec<String>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationStats {
    /// Number of documents validated
    pub documents_validated: usize,

    /// Number of records (environments, releases, differences, ...) inspected
    pub records_checked: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a new successful validation report.
    pub fn success() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Creates a new failed validation report with an error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.passed = false;
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.passed &= other.passed;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.stats.documents_validated += other.stats.documents_validated;
        self.stats.records_checked += other.stats.records_checked;
        self.stats.duration_ms += other.stats.duration_ms;
    }
}
