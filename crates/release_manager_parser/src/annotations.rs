//! Decoding of `release-manager.io/*` annotation values.
//!
//! Catalog annotations are plain strings. The environment annotation holds a
//! comma separated list of names; the others hold YAML (or JSON) documents.

use crate::{ParserError, Result};
use chrono::{DateTime, Utc};
use release_manager_core::{
    annotations, ConfigSchemaEntry, ConfigSource, ConfigValue, ConfigValueType, Configuration,
    DeploymentTarget, DynamicValue,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;

/// Deployment targets keyed by environment name.
pub type DeploymentsAnnotation = BTreeMap<String, DeploymentTarget>;

/// Configuration key/value pairs keyed by environment name.
pub type EnvironmentConfigAnnotation = BTreeMap<String, BTreeMap<String, DynamicValue>>;

/// Parses the environment annotation: a comma separated list of names.
///
/// # Example
///
/// ```rust
/// use release_manager_parser::parse_environment_annotation;
///
/// let envs = parse_environment_annotation("dev, staging,production").unwrap();
/// assert_eq!(envs, vec!["dev", "staging", "production"]);
/// ```
pub fn parse_environment_annotation(value: &str) -> Result<Vec<String>> {
    let names: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(invalid(annotations::ENVIRONMENT, "no environment names"));
    }
    Ok(names)
}

/// Parses the deployments annotation: a map of environment name to target.
pub fn parse_deployments_annotation(value: &str) -> Result<DeploymentsAnnotation> {
    parse_structured(annotations::DEPLOYMENTS, value)
}

/// Parses the config schema annotation: a list of tracked keys.
pub fn parse_config_schema_annotation(value: &str) -> Result<Vec<ConfigSchemaEntry>> {
    parse_structured(annotations::CONFIG_SCHEMA, value)
}

/// Parses the environment config annotation: per-environment key/value maps.
pub fn parse_environment_config_annotation(value: &str) -> Result<EnvironmentConfigAnnotation> {
    parse_structured(annotations::ENVIRONMENT_CONFIG, value)
}

/// Builds a configuration snapshot for one environment from the environment
/// config annotation. Returns `None` when the environment is not listed.
///
/// Keys named in `schema` take their source and secret flag from it and must
/// hold a value of the declared type; other keys are recorded as `manual`.
pub fn configuration_from_annotation(
    annotation: &EnvironmentConfigAnnotation,
    environment: &str,
    schema: &[ConfigSchemaEntry],
    captured_at: DateTime<Utc>,
) -> Result<Option<Configuration>> {
    let Some(entries) = annotation.get(environment) else {
        return Ok(None);
    };

    let values = entries
        .iter()
        .map(|(key, value)| {
            let declared = schema.iter().find(|e| e.key == *key);
            if let Some(entry) = declared {
                let actual = ConfigValueType::of(value);
                if actual != Some(entry.value_type) {
                    let actual = actual.map_or(value.type_name(), |t| t.as_str());
                    return Err(invalid(
                        annotations::ENVIRONMENT_CONFIG,
                        &format!(
                            "{environment}.{key} is declared as {} but holds {actual}",
                            entry.value_type
                        ),
                    ));
                }
            }
            let source = declared.map_or(ConfigSource::Manual, |e| e.source);
            let mut config_value = ConfigValue::new(key.clone(), value.clone(), source)
                .map_err(|e| invalid(annotations::ENVIRONMENT_CONFIG, &e.to_string()))?;
            if let Some(entry) = declared {
                config_value.secret = entry.secret;
                config_value.source_path = Some(entry.resolve_path(environment));
            }
            Ok(config_value)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(Configuration::new(captured_at, values)))
}

/// Parses any annotation by its key.
///
/// The environment annotation goes through the same comma splitting as
/// [`parse_environment_annotation`], so it decodes into a list of names.
pub fn parse_annotation<T: DeserializeOwned>(key: &str, value: &str) -> Result<T> {
    if !annotations::is_release_manager_key(key) {
        return Err(invalid(key, "not a release-manager.io annotation"));
    }
    if key == annotations::ENVIRONMENT {
        let names = parse_environment_annotation(value)?;
        return serde_json::from_value(serde_json::Value::from(names))
            .map_err(|e| invalid(key, &e.to_string()));
    }
    parse_structured(key, value)
}

fn parse_structured<T: DeserializeOwned>(key: &str, value: &str) -> Result<T> {
    debug!(annotation = key, "Parsing annotation value");
    serde_yaml_ng::from_str(value).map_err(|e| invalid(key, &e.to_string()))
}

fn invalid(key: &str, message: &str) -> ParserError {
    ParserError::InvalidAnnotation {
        key: key.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use release_manager_core::SECRET_MASK;

    #[test]
    fn test_environment_annotation_rejects_empty() {
        assert!(matches!(
            parse_environment_annotation(" , "),
            Err(ParserError::InvalidAnnotation { key, .. }) if key == annotations::ENVIRONMENT
        ));
    }

    #[test]
    fn test_deployments_annotation_yaml() {
        let value = r#"
staging:
  provider: kubernetes
  namespace: shop-staging
  labelSelector: app=hybris
production:
  provider: aws-ecs
  cluster: prod
  serviceName: hybris
"#;
        let targets = parse_deployments_annotation(value).unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets["staging"].provider(), "kubernetes");
        assert_eq!(
            targets["production"],
            DeploymentTarget::AwsEcs {
                cluster: "prod".to_string(),
                service_name: "hybris".to_string(),
            }
        );
    }

    #[test]
    fn test_deployments_annotation_json() {
        let value = r#"{"dev": {"provider": "aws-lambda", "functionName": "checkout"}}"#;
        let targets = parse_deployments_annotation(value).unwrap();
        assert_eq!(targets["dev"].provider(), "aws-lambda");
    }

    #[test]
    fn test_bad_deployments_annotation() {
        let err = parse_deployments_annotation("dev: {provider: gcp-run}").unwrap_err();
        assert!(err.to_string().contains(annotations::DEPLOYMENTS), "{err}");
    }

    #[test]
    fn test_config_annotations_build_snapshot() {
        let schema = parse_config_schema_annotation(
            r#"
- key: DB_HOST
  type: string
  source: aws_ssm
  path: /hybris/{env}/db/host
- key: DB_PASSWORD
  type: string
  source: aws_secrets_manager
  path: hybris/{env}/db
  secret: true
"#,
        )
        .unwrap();
        let config = parse_environment_config_annotation(
            r#"
staging:
  DB_HOST: db.staging.internal
  DB_PASSWORD: s3cr3t
  POOL_SIZE: 10
"#,
        )
        .unwrap();

        let captured_at = Utc::now();
        let snapshot = configuration_from_annotation(&config, "staging", &schema, captured_at)
            .unwrap()
            .expect("staging should be present");

        let host = snapshot.get("DB_HOST").unwrap();
        assert_eq!(host.source, ConfigSource::AwsSsm);
        assert_eq!(host.source_path.as_deref(), Some("/hybris/staging/db/host"));

        let password = snapshot.get("DB_PASSWORD").unwrap();
        assert!(password.secret);
        assert_eq!(password.masked().value, DynamicValue::from(SECRET_MASK));

        let pool = snapshot.get("POOL_SIZE").unwrap();
        assert_eq!(pool.source, ConfigSource::Manual);
        assert_eq!(pool.value_type, ConfigValueType::Number);

        assert!(
            configuration_from_annotation(&config, "production", &schema, captured_at)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_null_config_value_rejected() {
        let config = parse_environment_config_annotation("dev:\n  EMPTY: ~\n").unwrap();
        let result = configuration_from_annotation(&config, "dev", &[], Utc::now());
        assert!(matches!(result, Err(ParserError::InvalidAnnotation { .. })));
    }

    #[test]
    fn test_parse_annotation_requires_known_key() {
        let result: Result<Vec<ConfigSchemaEntry>> = parse_annotation("example.com/schema", "[]");
        assert!(result.is_err());

        let entries: Vec<ConfigSchemaEntry> =
            parse_annotation(annotations::CONFIG_SCHEMA, "[]").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_config_value_must_match_declared_type() {
        let schema = parse_config_schema_annotation(
            "- key: DB_PORT\n  type: number\n  source: aws_ssm\n  path: /shop/{env}/db/port\n",
        )
        .unwrap();
        let config = parse_environment_config_annotation("dev:\n  DB_PORT: \"5432\"\n").unwrap();

        let err = configuration_from_annotation(&config, "dev", &schema, Utc::now()).unwrap_err();
        match err {
            ParserError::InvalidAnnotation { key, message } => {
                assert_eq!(key, annotations::ENVIRONMENT_CONFIG);
                assert!(message.contains("DB_PORT"), "{message}");
                assert!(message.contains("number"), "{message}");
                assert!(message.contains("string"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let config = parse_environment_config_annotation("dev:\n  DB_PORT: 5432\n").unwrap();
        let snapshot = configuration_from_annotation(&config, "dev", &schema, Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(
            snapshot.get("DB_PORT").unwrap().value_type,
            ConfigValueType::Number
        );
    }

    #[test]
    fn test_parse_annotation_splits_environment_list() {
        let envs: Vec<String> =
            parse_annotation(annotations::ENVIRONMENT, "dev, staging,production").unwrap();
        assert_eq!(envs, vec!["dev", "staging", "production"]);

        let single: Vec<String> = parse_annotation(annotations::ENVIRONMENT, "staging").unwrap();
        assert_eq!(single, vec!["staging"]);
    }

    #[test]
    fn test_parse_annotation_environment_rejects_other_shapes() {
        let empty: Result<Vec<String>> = parse_annotation(annotations::ENVIRONMENT, " , ");
        assert!(matches!(
            empty,
            Err(ParserError::InvalidAnnotation { key, .. }) if key == annotations::ENVIRONMENT
        ));

        let wrong: Result<BTreeMap<String, String>> =
            parse_annotation(annotations::ENVIRONMENT, "dev,staging");
        assert!(matches!(
            wrong,
            Err(ParserError::InvalidAnnotation { key, .. }) if key == annotations::ENVIRONMENT
        ));
    }
}
