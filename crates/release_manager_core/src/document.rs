//! Self-describing envelope around any contract shape.
//!
//! A document names its shape in `kind` and carries the value in `data`:
//!
//! ```json
//! { "kind": "configDiff", "data": { "componentRef": "...", ... } }
//! ```

use crate::{
    ConfigDiff, ConfigSchemaEntry, Configuration, DeploymentInfo, DriftEvent, DriftFilter,
    Environment, PaginatedResponse, Release, ReleaseFilter, ReleaseMatrix,
};
use serde::{Deserialize, Serialize};

/// Any contract shape, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ContractDocument {
    Environments(Vec<Environment>),
    Release(Release),
    Releases(Vec<Release>),
    DeploymentInfo(DeploymentInfo),
    Configuration(Configuration),
    ConfigSchema(Vec<ConfigSchemaEntry>),
    ConfigDiff(ConfigDiff),
    DriftEvent(DriftEvent),
    DriftEvents(Vec<DriftEvent>),
    ReleaseMatrix(ReleaseMatrix),
    ReleasePage(PaginatedResponse<Release>),
    DriftPage(PaginatedResponse<DriftEvent>),
    ReleaseFilter(ReleaseFilter),
    DriftFilter(DriftFilter),
}

impl ContractDocument {
    /// Returns the `kind` tag of this document.
    pub fn kind(&self) -> &'static str {
        match self {
            ContractDocument::Environments(_) => "environments",
            ContractDocument::Release(_) => "release",
            ContractDocument::Releases(_) => "releases",
            ContractDocument::DeploymentInfo(_) => "deploymentInfo",
            ContractDocument::Configuration(_) => "configuration",
            ContractDocument::ConfigSchema(_) => "configSchema",
            ContractDocument::ConfigDiff(_) => "configDiff",
            ContractDocument::DriftEvent(_) => "driftEvent",
            ContractDocument::DriftEvents(_) => "driftEvents",
            ContractDocument::ReleaseMatrix(_) => "releaseMatrix",
            ContractDocument::ReleasePage(_) => "releasePage",
            ContractDocument::DriftPage(_) => "driftPage",
            ContractDocument::ReleaseFilter(_) => "releaseFilter",
            ContractDocument::DriftFilter(_) => "driftFilter",
        }
    }

    /// Decodes a document from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the document as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReleaseStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_matches_wire_tag() {
        let doc = ContractDocument::ReleaseFilter(ReleaseFilter {
            status: Some(ReleaseStatus::Failed),
            ..Default::default()
        });
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["kind"], doc.kind());
        assert_eq!(value["data"]["status"], "failed");
    }

    #[test]
    fn test_round_trip() {
        let json = r#"{
            "kind": "environments",
            "data": [
                {"name": "dev", "tier": "development", "promotesTo": "prod"},
                {"name": "prod", "tier": "production"}
            ]
        }"#;

        let doc = ContractDocument::from_json(json).unwrap();
        let ContractDocument::Environments(envs) = &doc else {
            panic!("Expected environments document");
        };
        assert_eq!(envs.len(), 2);

        let again = ContractDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(ContractDocument::from_json(r#"{"kind": "cluster", "data": {}}"#).is_err());
    }
}
