//! Drift events.
//!
//! A drift event stays open until `resolved_at` is set. `resolved_by` is only
//! meaningful on a resolved event.

use crate::DynamicValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A detected divergence between expected and actual state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftEvent {
    pub id: String,

    pub component_ref: String,

    pub environment: String,

    pub drift_type: DriftType,

    /// What the release log or schema says should be there
    pub expected_value: DynamicValue,

    /// What the provider reports
    pub actual_value: DynamicValue,

    pub detected_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DriftEvent {
    /// Creates an open drift event.
    pub fn open(
        id: impl Into<String>,
        component_ref: impl Into<String>,
        environment: impl Into<String>,
        drift_type: DriftType,
        expected_value: DynamicValue,
        actual_value: DynamicValue,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            component_ref: component_ref.into(),
            environment: environment.into(),
            drift_type,
            expected_value,
            actual_value,
            detected_at,
            resolved_at: None,
            resolved_by: None,
            description: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }

    /// Marks the event resolved. Resolving an already resolved event keeps the
    /// first resolution.
    pub fn resolve(self, at: DateTime<Utc>, by: Option<String>) -> Self {
        if self.is_resolved() {
            return self;
        }
        Self {
            resolved_at: Some(at),
            resolved_by: by,
            ..self
        }
    }

    /// Returns true if `resolved_by` is only set together with `resolved_at`.
    pub fn resolution_consistent(&self) -> bool {
        self.resolved_by.is_none() || self.resolved_at.is_some()
    }
}

/// Kind of divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftType {
    ConfigChanged,
    VersionChanged,
    ReplicaChanged,
    ResourceChanged,
}

impl fmt::Display for DriftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriftType::ConfigChanged => "config_changed",
            DriftType::VersionChanged => "version_changed",
            DriftType::ReplicaChanged => "replica_changed",
            DriftType::ResourceChanged => "resource_changed",
        };
        f.write_str(name)
    }
}
