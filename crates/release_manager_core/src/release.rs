//! Release records and live deployment state.
//!
//! A [`Release`] is an entry in the deployment log and is never edited once
//! recorded. [`DeploymentInfo`] is the current state read back from a provider
//! and can be recomputed at any time.

use crate::{Configuration, DynamicValue, Metadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metadata key under which a correction records the release it replaces.
pub const SUPERSEDES_KEY: &str = "supersedes";

/// An immutable deployment event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Unique release id
    pub id: String,

    /// Catalog reference of the deployed component (e.g. "component:default/hybris")
    pub component_ref: String,

    /// Environment name the release was deployed to
    pub environment: String,

    /// Deployed version, free-form
    pub version: String,

    /// Container image tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,

    /// When the deployment happened
    pub deployed_at: DateTime<Utc>,

    /// Who or what triggered the deployment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_by: Option<String>,

    /// System that triggered the deployment
    pub source: ReleaseSource,

    /// Outcome of the deployment
    pub status: ReleaseStatus,

    /// Configuration snapshot captured at deploy time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Release {
    /// Creates a new release record that corrects this one.
    ///
    /// The correction copies every field, takes the new id and records this
    /// release's id under [`SUPERSEDES_KEY`]. The original is left untouched.
    pub fn correction(&self, id: impl Into<String>) -> Release {
        let mut metadata = self.metadata.clone();
        metadata.insert(
            SUPERSEDES_KEY.to_string(),
            DynamicValue::String(self.id.clone()),
        );
        Release {
            id: id.into(),
            metadata,
            ..self.clone()
        }
    }

    /// Returns the id of the release this one corrects, if any.
    pub fn supersedes(&self) -> Option<&str> {
        self.metadata.get(SUPERSEDES_KEY).and_then(DynamicValue::as_str)
    }
}

/// System that triggered a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseSource {
    Kubernetes,
    Aws,
    Azure,
    Argocd,
    GithubActions,
    Manual,
    Api,
}

impl ReleaseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseSource::Kubernetes => "kubernetes",
            ReleaseSource::Aws => "aws",
            ReleaseSource::Azure => "azure",
            ReleaseSource::Argocd => "argocd",
            ReleaseSource::GithubActions => "github_actions",
            ReleaseSource::Manual => "manual",
            ReleaseSource::Api => "api",
        }
    }
}

impl fmt::Display for ReleaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStatus {
    Success,
    Failed,
    InProgress,
    Unknown,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Success => "success",
            ReleaseStatus::Failed => "failed",
            ReleaseStatus::InProgress => "in_progress",
            ReleaseStatus::Unknown => "unknown",
        }
    }

    /// Returns true once the release will not change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReleaseStatus::Success | ReleaseStatus::Failed)
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live state of a component in one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    /// Catalog reference of the component
    pub component_ref: String,

    /// Environment name
    pub environment: String,

    /// Version currently running
    pub version: String,

    /// Full image reference currently running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Desired and ready replica counts
    pub replicas: ReplicaCounts,

    /// Whether the provider reports the workload healthy
    pub healthy: bool,

    /// Provider status message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// When this state was read
    pub last_updated: DateTime<Utc>,
}

/// Desired versus ready replicas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplicaCounts {
    pub desired: u32,
    pub ready: u32,
}

impl ReplicaCounts {
    /// Returns true when every desired replica is ready.
    pub fn is_fully_ready(&self) -> bool {
        self.ready >= self.desired
    }
}
