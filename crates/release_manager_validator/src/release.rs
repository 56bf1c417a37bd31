//! Release and deployment state checks.

use crate::{ConfigurationValidator, ViolationError};
use regex::Regex;
use release_manager_core::{DeploymentInfo, Release};
use std::sync::LazyLock;

/// Catalog references look like `kind:namespace/name` or `kind:name`.
static COMPONENT_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9-]*:(?:[A-Za-z0-9][A-Za-z0-9._-]*/)?[A-Za-z0-9][A-Za-z0-9._-]*$")
        .expect("component reference pattern is valid")
});

/// Returns true if `value` is a well-formed component reference.
pub fn is_valid_component_ref(value: &str) -> bool {
    COMPONENT_REF.is_match(value)
}

/// Validates releases and live deployment state.
pub struct ReleaseValidator {
    configuration_validator: ConfigurationValidator,
}

impl ReleaseValidator {
    /// Creates a new release validator.
    pub fn new() -> Self {
        Self {
            configuration_validator: ConfigurationValidator::new(),
        }
    }

    /// Returns a list of violations. An empty list indicates success.
    pub fn validate(&self, release: &Release) -> Vec<ViolationError> {
        let mut errors = Vec::new();
        let context = format!("Release '{}'", release.id);

        if release.id.is_empty() {
            errors.push(ViolationError::empty_field("Release", "id"));
        }
        if !is_valid_component_ref(&release.component_ref) {
            errors.push(ViolationError::InvalidComponentRef {
                value: release.component_ref.clone(),
            });
        }
        if release.environment.is_empty() {
            errors.push(ViolationError::empty_field(&context, "environment"));
        }
        if release.version.trim().is_empty() {
            errors.push(ViolationError::empty_field(&context, "version"));
        }
        if let Some(configuration) = &release.configuration {
            errors.extend(self.configuration_validator.validate(configuration));
        }

        errors
    }

    pub fn validate_deployment(&self, info: &DeploymentInfo) -> Vec<ViolationError> {
        let mut errors = Vec::new();

        if !is_valid_component_ref(&info.component_ref) {
            errors.push(ViolationError::InvalidComponentRef {
                value: info.component_ref.clone(),
            });
        }
        if info.version.trim().is_empty() {
            errors.push(ViolationError::empty_field(
                format!("DeploymentInfo '{}'", info.component_ref),
                "version",
            ));
        }
        if info.replicas.ready > info.replicas.desired {
            errors.push(ViolationError::ReadyExceedsDesired {
                component: info.component_ref.clone(),
                environment: info.environment.clone(),
                ready: info.replicas.ready,
                desired: info.replicas.desired,
            });
        }

        errors
    }
}

impl Default for ReleaseValidator {
    fn default() -> Self {
        Self::new()
    }
}
