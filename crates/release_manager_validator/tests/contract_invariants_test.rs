//! End-to-end checks of decoded contract documents.
//!
//! Documents are decoded through the parser exactly as producers would send
//! them, then handed to the validation engine.

use release_manager_core::{
    ConfigDiff, Configuration, ContractDocument, ContractValidator, DiffStatus, Release,
    ReleaseMatrix, ReleaseStatus, ValidationContext,
};
use release_manager_parser::{parse_json, parse_yaml};
use release_manager_validator::DocumentValidator;
use serde_json::json;

fn validate(document: &ContractDocument) -> release_manager_core::ValidationReport {
    DocumentValidator::new().validate(document, &ValidationContext::new())
}

#[test]
fn test_in_progress_release_without_configuration() {
    let release: Release = parse_json(
        r#"{
            "id": "rel-42",
            "componentRef": "component:default/hybris",
            "environment": "staging",
            "version": "2.4.0",
            "deployedAt": "2025-03-01T10:00:00Z",
            "source": "argocd",
            "status": "in_progress"
        }"#,
    )
    .unwrap();

    assert_eq!(release.status, ReleaseStatus::InProgress);
    assert!(release.configuration.is_none());

    let encoded = serde_json::to_value(&release).unwrap();
    assert!(encoded.get("configuration").is_none());

    let report = validate(&ContractDocument::Release(release));
    assert!(report.passed, "errors: {:?}", report.errors);
}

#[test]
fn test_missing_key_counts_as_missing() {
    let staging: Configuration = parse_json(
        r#"{
            "capturedAt": "2025-03-01T10:00:00Z",
            "values": [
                {"key": "DB_HOST", "value": "a", "type": "string", "source": "aws_ssm"},
                {"key": "POOL", "value": 10, "type": "number", "source": "manual"}
            ]
        }"#,
    )
    .unwrap();
    let production: Configuration = parse_json(
        r#"{
            "capturedAt": "2025-03-01T11:00:00Z",
            "values": [
                {"key": "POOL", "value": 20, "type": "number", "source": "manual"}
            ]
        }"#,
    )
    .unwrap();

    let diff = ConfigDiff::compare(
        "component:default/hybris",
        "staging",
        &staging,
        "production",
        &production,
    );

    let db_host = diff
        .differences
        .iter()
        .find(|d| d.key == "DB_HOST")
        .unwrap();
    assert_eq!(db_host.status, DiffStatus::Missing);
    assert!(db_host.value2.is_none());
    assert_eq!(diff.missing_count, 1);
    assert_eq!(diff.different_count, 1);
    assert_eq!(diff.same_count, 0);

    let wire = serde_json::to_value(&diff).unwrap();
    assert_eq!(wire["differences"][0]["key"], json!("DB_HOST"));
    assert_eq!(wire["differences"][0]["value2"], json!(null));

    let report = validate(&ContractDocument::ConfigDiff(diff));
    assert!(report.passed, "errors: {:?}", report.errors);
}

#[test]
fn test_tampered_diff_counts_fail() {
    let document: ContractDocument = parse_json(
        r#"{
            "kind": "configDiff",
            "data": {
                "componentRef": "component:default/hybris",
                "environment1": "staging",
                "environment2": "production",
                "differences": [
                    {"key": "DB_HOST", "value1": "a", "value2": null, "status": "missing"}
                ],
                "sameCount": 0,
                "differentCount": 1,
                "missingCount": 0
            }
        }"#,
    )
    .unwrap();

    let report = validate(&document);
    assert!(!report.passed);
    assert_eq!(report.errors.len(), 2, "errors: {:?}", report.errors);
    assert!(report.errors[0].contains("differentCount"));
    assert!(report.errors[1].contains("missingCount"));
}

#[test]
fn test_matrix_flag_mismatch_fails() {
    let document: ContractDocument = parse_yaml(
        r#"
kind: releaseMatrix
data:
  environments: [staging, production]
  generatedAt: "2025-03-01T12:00:00Z"
  rows:
    - componentRef: component:default/hybris
      allSameVersion: true
      cells:
        staging:
          version: "2.4.0"
          hasDrift: false
        production:
          version: "2.3.9"
          hasDrift: true
"#,
    )
    .unwrap();

    let report = validate(&document);
    assert!(!report.passed);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("allSameVersion=true"));
}

#[test]
fn test_matrix_built_from_releases_is_consistent() {
    let releases: Vec<Release> = parse_json(
        r#"[
            {"id": "1", "componentRef": "component:default/api", "environment": "staging",
             "version": "1.1", "deployedAt": "2025-03-01T10:00:00Z", "source": "github_actions",
             "status": "success"},
            {"id": "2", "componentRef": "component:default/api", "environment": "production",
             "version": "1.0", "deployedAt": "2025-02-01T10:00:00Z", "source": "github_actions",
             "status": "failed"}
        ]"#,
    )
    .unwrap();

    let matrix = ReleaseMatrix::from_releases(
        vec!["staging".to_string(), "production".to_string()],
        &releases,
        chrono::Utc::now(),
    );

    let report = validate(&ContractDocument::ReleaseMatrix(matrix));
    assert!(report.passed, "errors: {:?}", report.errors);
}

#[test]
fn test_drift_page_bounds_and_resolution() {
    let document: ContractDocument = parse_json(
        r#"{
            "kind": "driftPage",
            "data": {
                "items": [
                    {
                        "id": "d-1",
                        "componentRef": "component:default/hybris",
                        "environment": "production",
                        "driftType": "replica_changed",
                        "expectedValue": 3,
                        "actualValue": 2,
                        "detectedAt": "2025-03-01T10:00:00Z",
                        "resolvedBy": "ops"
                    }
                ],
                "totalCount": 1,
                "limit": 10,
                "offset": 5
            }
        }"#,
    )
    .unwrap();

    let report = validate(&document);
    assert!(!report.passed);
    assert_eq!(report.errors.len(), 2, "errors: {:?}", report.errors);
    assert!(report.errors.iter().any(|e| e.contains("totalCount")));
    assert!(report.errors.iter().any(|e| e.contains("resolvedBy")));
}

#[test]
fn test_promotion_cycle_in_yaml_environments() {
    let document: ContractDocument = parse_yaml(
        r#"
kind: environments
data:
  - name: dev
    tier: development
    promotesTo: staging
  - name: staging
    tier: staging
    promotesTo: dev
"#,
    )
    .unwrap();

    let report = validate(&document);
    assert!(!report.passed);
    assert_eq!(report.errors, vec!["Promotion cycle: dev -> staging -> dev"]);
    // staging -> dev is also a downgrade
    assert_eq!(report.warnings.len(), 1);
}
