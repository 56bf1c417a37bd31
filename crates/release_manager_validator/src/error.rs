//! Violation types reported by the conformance checks.

use thiserror::Error;

/// How a violation affects the validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Always fails validation
    Error,
    /// Fails validation only in strict mode
    Warning,
}

/// A broken contract invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViolationError {
    /// Denormalized count disagrees with the data it summarizes
    #[error("{counter} is {declared} but {actual} difference(s) have that status")]
    CountMismatch {
        counter: &'static str,
        declared: usize,
        actual: usize,
    },

    /// Same key listed twice
    #[error("Duplicate key '{key}' in {scope}")]
    DuplicateKey { scope: String, key: String },

    /// `missing` entry must have exactly one null side
    #[error("Difference '{key}' is marked missing but has {present} value(s) present")]
    MissingShape { key: String, present: usize },

    /// `same` entry with unequal values
    #[error("Difference '{key}' is marked same but its values differ")]
    SameWithDifferentValues { key: String },

    /// Non-missing entry with a null side
    #[error("Difference '{key}' is marked {status} but a value is null")]
    NullInComparedValue { key: String, status: String },

    /// Row flag disagrees with its cells
    #[error(
        "Row '{component}' declares allSameVersion={declared} but its cells give {actual}"
    )]
    AllSameVersionMismatch {
        component: String,
        declared: bool,
        actual: bool,
    },

    /// Matrix cell for an environment the matrix does not list
    #[error("Row '{component}' has a cell for unlisted environment '{environment}'")]
    UnknownMatrixEnvironment {
        component: String,
        environment: String,
    },

    /// `resolvedBy` set on an open event
    #[error("Drift event '{id}' has resolvedBy but no resolvedAt")]
    ResolvedByWithoutResolvedAt { id: String },

    /// Resolution precedes detection
    #[error("Drift event '{id}' is resolved before it was detected")]
    ResolvedBeforeDetected { id: String },

    /// More items than the page limit
    #[error("Page holds {items} item(s) but limit is {limit}")]
    PageOverLimit { items: usize, limit: usize },

    /// Page reaches past the reported total
    #[error("Page offset {offset} + {items} item(s) exceeds totalCount {total}")]
    PageBeyondTotal {
        offset: usize,
        items: usize,
        total: usize,
    },

    /// Zero page size requested
    #[error("{context} requests a limit of 0")]
    ZeroLimit { context: String },

    /// `since` after `until`
    #[error("{context} has since ({since}) after until ({until})")]
    InvertedRange {
        context: String,
        since: String,
        until: String,
    },

    /// Environment name used twice
    #[error("Duplicate environment '{name}'")]
    DuplicateEnvironment { name: String },

    /// Promotion target does not exist
    #[error("Environment '{environment}' promotes to unknown environment '{target}'")]
    UnknownPromotionTarget { environment: String, target: String },

    /// Environment promotes to itself
    #[error("Environment '{environment}' promotes to itself")]
    SelfPromotion { environment: String },

    /// Promotion chain loops
    #[error("Promotion cycle: {path}")]
    PromotionCycle { path: String },

    /// Promotion into a lower tier
    #[error("Environment '{from}' ({from_tier}) promotes to lower tier '{to}' ({to_tier})")]
    PromotionDowngrade {
        from: String,
        from_tier: String,
        to: String,
        to_tier: String,
    },

    /// Component reference is not `kind:[namespace/]name`
    #[error("Invalid component reference '{value}'")]
    InvalidComponentRef { value: String },

    /// Required string is empty
    #[error("{context}: {field} is empty")]
    EmptyField { context: String, field: String },

    /// Secret value not masked
    #[error("Secret value '{key}' is not masked")]
    UnmaskedSecret { key: String },

    /// Schema path has no `{env}` placeholder
    #[error("Schema path for '{key}' has no {{env}} placeholder")]
    MissingEnvPlaceholder { key: String },

    /// More ready replicas than desired
    #[error("Deployment of '{component}' in '{environment}' reports {ready} ready of {desired} desired replicas")]
    ReadyExceedsDesired {
        component: String,
        environment: String,
        ready: u32,
        desired: u32,
    },
}

impl ViolationError {
    /// Returns the severity of this violation.
    pub fn severity(&self) -> Severity {
        match self {
            ViolationError::UnknownMatrixEnvironment { .. }
            | ViolationError::PromotionDowngrade { .. }
            | ViolationError::UnmaskedSecret { .. }
            | ViolationError::MissingEnvPlaceholder { .. }
            | ViolationError::ReadyExceedsDesired { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Creates a new empty field error.
    pub fn empty_field(context: impl Into<String>, field: impl Into<String>) -> Self {
        Self::EmptyField {
            context: context.into(),
            field: field.into(),
        }
    }

    /// Creates a new duplicate key error.
    pub fn duplicate_key(scope: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            scope: scope.into(),
            key: key.into(),
        }
    }
}
