//! Main validation engine.
//!
//! [`DocumentValidator`] dispatches a [`ContractDocument`] to the checks for
//! its kind and folds the violations into a [`ValidationReport`].

use crate::{
    ConfigurationValidator, DiffValidator, DriftValidator, EnvironmentValidator, MatrixValidator,
    PaginationValidator, ReleaseValidator, Severity, ViolationError, is_valid_component_ref,
};
use release_manager_core::{
    ContractDocument, ContractValidator, DriftEvent, ValidationContext, ValidationReport,
    ValidationStats,
};
use std::time::Instant;
use tracing::{debug, info};

/// Validation engine for contract documents.
///
/// Violations with [`Severity::Warning`] are reported as warnings unless the
/// context is strict, in which case they fail validation like errors.
///
/// # Example
///
/// ```rust
/// use release_manager_core::{ContractDocument, ContractValidator, ValidationContext};
/// use release_manager_validator::DocumentValidator;
///
/// let document = ContractDocument::from_json(
///     r#"{"kind": "driftFilter", "data": {"limit": 0}}"#,
/// ).unwrap();
///
/// let report = DocumentValidator::new().validate(&document, &ValidationContext::new());
/// assert!(!report.passed);
/// ```
pub struct DocumentValidator {
    environment_validator: EnvironmentValidator,
    release_validator: ReleaseValidator,
    configuration_validator: ConfigurationValidator,
    diff_validator: DiffValidator,
    drift_validator: DriftValidator,
    matrix_validator: MatrixValidator,
    pagination_validator: PaginationValidator,
}

impl DocumentValidator {
    /// Creates a new document validator.
    pub fn new() -> Self {
        Self {
            environment_validator: EnvironmentValidator::new(),
            release_validator: ReleaseValidator::new(),
            configuration_validator: ConfigurationValidator::new(),
            diff_validator: DiffValidator::new(),
            drift_validator: DriftValidator::new(),
            matrix_validator: MatrixValidator::new(),
            pagination_validator: PaginationValidator::new(),
        }
    }

    /// Runs every check for the document's kind.
    ///
    /// Returns the raw violations together with the number of records
    /// inspected.
    pub fn violations(&self, document: &ContractDocument) -> (Vec<ViolationError>, usize) {
        match document {
            ContractDocument::Environments(environments) => (
                self.environment_validator.validate(environments),
                environments.len(),
            ),
            ContractDocument::Release(release) => (self.release_validator.validate(release), 1),
            ContractDocument::Releases(releases) => (
                releases
                    .iter()
                    .flat_map(|r| self.release_validator.validate(r))
                    .collect(),
                releases.len(),
            ),
            ContractDocument::DeploymentInfo(info) => {
                (self.release_validator.validate_deployment(info), 1)
            }
            ContractDocument::Configuration(configuration) => (
                self.configuration_validator.validate(configuration),
                configuration.values.len(),
            ),
            ContractDocument::ConfigSchema(entries) => (
                self.configuration_validator.validate_schema(entries),
                entries.len(),
            ),
            ContractDocument::ConfigDiff(diff) => {
                // The diff check reports an empty reference itself.
                let mut errors = if diff.component_ref.is_empty() {
                    Vec::new()
                } else {
                    check_ref(&diff.component_ref)
                };
                errors.extend(self.diff_validator.validate(diff));
                (errors, diff.differences.len())
            }
            ContractDocument::DriftEvent(event) => (self.drift_event(event), 1),
            ContractDocument::DriftEvents(events) => (
                events.iter().flat_map(|e| self.drift_event(e)).collect(),
                events.len(),
            ),
            ContractDocument::ReleaseMatrix(matrix) => {
                let mut errors: Vec<ViolationError> = matrix
                    .rows
                    .iter()
                    .flat_map(|row| check_ref(&row.component_ref))
                    .collect();
                errors.extend(self.matrix_validator.validate(matrix));
                (errors, matrix.rows.len())
            }
            ContractDocument::ReleasePage(page) => {
                let mut errors = self.pagination_validator.validate_page(page);
                for release in &page.items {
                    errors.extend(self.release_validator.validate(release));
                }
                (errors, page.items.len())
            }
            ContractDocument::DriftPage(page) => {
                let mut errors = self.pagination_validator.validate_page(page);
                for event in &page.items {
                    errors.extend(self.drift_event(event));
                }
                (errors, page.items.len())
            }
            ContractDocument::ReleaseFilter(filter) => {
                (self.pagination_validator.validate_release_filter(filter), 1)
            }
            ContractDocument::DriftFilter(filter) => {
                (self.pagination_validator.validate_drift_filter(filter), 1)
            }
        }
    }

    fn drift_event(&self, event: &DriftEvent) -> Vec<ViolationError> {
        let mut errors = check_ref(&event.component_ref);
        errors.extend(self.drift_validator.validate(event));
        errors
    }

    /// Builds a validation report from collected violations.
    fn build_report(
        &self,
        violations: Vec<ViolationError>,
        records_checked: usize,
        context: &ValidationContext,
        start: Instant,
    ) -> ValidationReport {
        let mut report = ValidationReport::success();

        for violation in violations {
            match violation.severity() {
                Severity::Warning if !context.strict => report.add_warning(violation.to_string()),
                _ => report.add_error(violation.to_string()),
            }
        }

        report.stats = ValidationStats {
            documents_validated: 1,
            records_checked,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        report
    }
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractValidator for DocumentValidator {
    fn validate(
        &self,
        document: &ContractDocument,
        context: &ValidationContext,
    ) -> ValidationReport {
        let start = Instant::now();
        debug!(kind = document.kind(), strict = context.strict, "Validating document");

        let (violations, records_checked) = self.violations(document);
        let report = self.build_report(violations, records_checked, context, start);

        info!(
            kind = document.kind(),
            passed = report.passed,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Validation finished"
        );
        report
    }
}

fn check_ref(component_ref: &str) -> Vec<ViolationError> {
    if is_valid_component_ref(component_ref) {
        Vec::new()
    } else {
        vec![ViolationError::InvalidComponentRef {
            value: component_ref.to_string(),
        }]
    }
}
