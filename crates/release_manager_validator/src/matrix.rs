//! ReleaseMatrix checks.

use crate::ViolationError;
use release_manager_core::{ReleaseMatrix, ReleaseMatrixRow};

/// Validates release matrices and their rows.
pub struct MatrixValidator;

impl MatrixValidator {
    /// Creates a new matrix validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates every row of a matrix.
    pub fn validate(&self, matrix: &ReleaseMatrix) -> Vec<ViolationError> {
        let mut errors = Vec::new();

        for row in &matrix.rows {
            errors.extend(self.validate_row(row));

            for environment in row.cells.keys() {
                if !matrix.environments.contains(environment) {
                    errors.push(ViolationError::UnknownMatrixEnvironment {
                        component: row.component_ref.clone(),
                        environment: environment.clone(),
                    });
                }
            }
        }

        errors
    }

    /// Validates a single row's derived flag.
    pub fn validate_row(&self, row: &ReleaseMatrixRow) -> Vec<ViolationError> {
        let actual = row.compute_all_same_version();
        if actual == row.all_same_version {
            return Vec::new();
        }
        vec![ViolationError::AllSameVersionMismatch {
            component: row.component_ref.clone(),
            declared: row.all_same_version,
            actual,
        }]
    }
}

impl Default for MatrixValidator {
    fn default() -> Self {
        Self::new()
    }
}
