//! ConfigDiff checks.
//!
//! Counts on a diff are denormalized, so they are recomputed here rather than
//! trusted. Each difference must also agree with its own status.

use crate::ViolationError;
use release_manager_core::{ConfigDiff, ConfigDifference, DiffStatus};
use std::collections::HashSet;

/// Validates configuration diffs.
pub struct DiffValidator;

impl DiffValidator {
    /// Creates a new diff validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns a list of violations. An empty list indicates success.
    pub fn validate(&self, diff: &ConfigDiff) -> Vec<ViolationError> {
        let mut errors = Vec::new();

        if diff.component_ref.is_empty() {
            errors.push(ViolationError::empty_field("ConfigDiff", "componentRef"));
        }

        let counts = diff.tally();
        for (counter, declared, actual) in [
            ("sameCount", diff.same_count, counts.same),
            ("differentCount", diff.different_count, counts.different),
            ("missingCount", diff.missing_count, counts.missing),
        ] {
            if declared != actual {
                errors.push(ViolationError::CountMismatch {
                    counter,
                    declared,
                    actual,
                });
            }
        }

        let mut seen = HashSet::new();
        for difference in &diff.differences {
            if !seen.insert(difference.key.as_str()) {
                errors.push(ViolationError::duplicate_key(
                    format!("diff of '{}'", diff.component_ref),
                    &difference.key,
                ));
            }
            if let Some(err) = self.validate_difference(difference) {
                errors.push(err);
            }
        }

        errors
    }

    /// Checks that a difference's values fit its status.
    fn validate_difference(&self, difference: &ConfigDifference) -> Option<ViolationError> {
        let present = [difference.value1.as_ref(), difference.value2.as_ref()]
            .into_iter()
            .filter(|v| matches!(v, Some(value) if !value.is_null()))
            .count();

        match difference.status {
            DiffStatus::Missing if present != 1 => Some(ViolationError::MissingShape {
                key: difference.key.clone(),
                present,
            }),
            DiffStatus::Missing => None,
            _ if present != 2 => Some(ViolationError::NullInComparedValue {
                key: difference.key.clone(),
                status: difference.status.to_string(),
            }),
            // Masked secrets compare equal on the wire whatever their real value.
            DiffStatus::Same if !difference.secret && !same_values(difference) => {
                Some(ViolationError::SameWithDifferentValues {
                    key: difference.key.clone(),
                })
            }
            _ => None,
        }
    }
}

fn same_values(difference: &ConfigDifference) -> bool {
    match (&difference.value1, &difference.value2) {
        (Some(a), Some(b)) => a.same_value(b),
        _ => false,
    }
}

impl Default for DiffValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use release_manager_core::DynamicValue;

    fn difference(
        key: &str,
        value1: Option<&str>,
        value2: Option<&str>,
        status: DiffStatus,
    ) -> ConfigDifference {
        ConfigDifference {
            key: key.to_string(),
            value1: value1.map(DynamicValue::from),
            value2: value2.map(DynamicValue::from),
            status,
            secret: false,
        }
    }

    #[test]
    fn test_consistent_diff_passes() {
        let diff = ConfigDiff::new(
            "component:default/api",
            "staging",
            "production",
            vec![
                difference("A", Some("x"), Some("x"), DiffStatus::Same),
                difference("B", Some("x"), Some("y"), DiffStatus::Different),
                difference("C", Some("x"), None, DiffStatus::Missing),
                difference("D", Some("x"), Some("z"), DiffStatus::Drift),
            ],
        );
        assert_eq!(DiffValidator::new().validate(&diff), vec![]);
    }

    #[test]
    fn test_count_mismatch() {
        let mut diff = ConfigDiff::new(
            "component:default/api",
            "a",
            "b",
            vec![difference("DB_HOST", Some("a"), None, DiffStatus::Missing)],
        );
        diff.missing_count = 0;
        diff.different_count = 1;

        let errors = DiffValidator::new().validate(&diff);
        assert_eq!(
            errors,
            vec![
                ViolationError::CountMismatch {
                    counter: "differentCount",
                    declared: 1,
                    actual: 0,
                },
                ViolationError::CountMismatch {
                    counter: "missingCount",
                    declared: 0,
                    actual: 1,
                },
            ]
        );
    }

    #[test]
    fn test_status_shape_checks() {
        let diff = ConfigDiff::new(
            "component:default/api",
            "a",
            "b",
            vec![
                difference("BOTH", Some("a"), Some("b"), DiffStatus::Missing),
                difference("SAME", Some("a"), Some("b"), DiffStatus::Same),
                difference("NULL", Some("a"), None, DiffStatus::Different),
                difference("BOTH", Some("a"), Some("a"), DiffStatus::Same),
            ],
        );

        let errors = DiffValidator::new().validate(&diff);
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(matches!(errors[0], ViolationError::MissingShape { present: 2, .. }));
        assert!(matches!(errors[1], ViolationError::SameWithDifferentValues { .. }));
        assert!(matches!(errors[2], ViolationError::NullInComparedValue { .. }));
        assert!(matches!(errors[3], ViolationError::DuplicateKey { .. }));
    }

    #[test]
    fn test_same_accepts_equal_numbers_in_either_form() {
        let diff = ConfigDiff::new(
            "component:default/api",
            "a",
            "b",
            vec![ConfigDifference {
                key: "POOL_SIZE".to_string(),
                value1: Some(DynamicValue::from(10i64)),
                value2: Some(DynamicValue::from(10.0)),
                status: DiffStatus::Same,
                secret: false,
            }],
        );
        assert_eq!(DiffValidator::new().validate(&diff), vec![]);
    }
}
