//! Environment and provider types.
//!
//! An environment is a named deployment stage (e.g. `staging`) with a tier,
//! an optional promotion target and the provider settings needed to reach it.

use crate::Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A deployment environment.
///
/// # Example
///
/// ```rust
/// use release_manager_core::{Environment, EnvironmentTier, ProviderConfig};
///
/// let staging = Environment {
///     name: "staging".to_string(),
///     tier: EnvironmentTier::Staging,
///     promotes_to: Some("production".to_string()),
///     providers: vec![ProviderConfig::Kubernetes {
///         cluster: "eu-west-staging".to_string(),
///         api_server: None,
///         token: None,
///     }],
///     metadata: Default::default(),
/// };
/// assert_eq!(staging.promotion_target(), Some("production"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Unique environment name
    pub name: String,

    /// Lifecycle stage of the environment
    pub tier: EnvironmentTier,

    /// Name of the environment releases are promoted to next
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotes_to: Option<String>,

    /// Provider settings used to inspect this environment
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Environment {
    /// Returns the promotion target, if any.
    pub fn promotion_target(&self) -> Option<&str> {
        self.promotes_to.as_deref()
    }

    /// Returns a copy with provider credentials removed.
    pub fn redacted(&self) -> Self {
        Self {
            providers: self.providers.iter().map(ProviderConfig::redacted).collect(),
            ..self.clone()
        }
    }
}

/// Lifecycle stage of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentTier {
    Development,
    Staging,
    Production,
}

impl EnvironmentTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentTier::Development => "development",
            EnvironmentTier::Staging => "staging",
            EnvironmentTier::Production => "production",
        }
    }
}

impl fmt::Display for EnvironmentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for the platform hosting an environment.
///
/// Discriminated on the wire by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ProviderConfig {
    /// Kubernetes cluster
    Kubernetes {
        /// Cluster name
        cluster: String,
        /// API server URL, when not resolved from the cluster name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_server: Option<String>,
        /// Service account token
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },

    /// AWS account
    Aws {
        /// AWS account id
        account_id: String,
        /// AWS region (e.g. "eu-west-1")
        region: String,
        /// Named credentials profile
        #[serde(default, skip_serializing_if = "Option::is_none")]
        profile: Option<String>,
        /// Role to assume
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role_arn: Option<String>,
    },

    /// Azure subscription
    Azure {
        /// Subscription id
        subscription_id: String,
        /// Resource group name
        resource_group: String,
        /// Azure region (e.g. "westeurope")
        region: String,
    },
}

impl ProviderConfig {
    /// Returns the `type` tag of this provider.
    pub fn provider_type(&self) -> &'static str {
        match self {
            ProviderConfig::Kubernetes { .. } => "kubernetes",
            ProviderConfig::Aws { .. } => "aws",
            ProviderConfig::Azure { .. } => "azure",
        }
    }

    /// Returns a copy with credentials removed.
    pub fn redacted(&self) -> Self {
        match self {
            ProviderConfig::Kubernetes {
                cluster,
                api_server,
                ..
            } => ProviderConfig::Kubernetes {
                cluster: cluster.clone(),
                api_server: api_server.clone(),
                token: None,
            },
            other => other.clone(),
        }
    }
}

/// Where a component runs inside an environment.
///
/// Discriminated on the wire by the `provider` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DeploymentTarget {
    /// Kubernetes workload selected by labels
    Kubernetes {
        namespace: String,
        label_selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deployment_name: Option<String>,
    },

    /// AWS Lambda function
    AwsLambda {
        function_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },

    /// AWS ECS service
    AwsEcs {
        cluster: String,
        service_name: String,
    },
}

impl DeploymentTarget {
    /// Returns the `provider` tag of this target.
    pub fn provider(&self) -> &'static str {
        match self {
            DeploymentTarget::Kubernetes { .. } => "kubernetes",
            DeploymentTarget::AwsLambda { .. } => "aws-lambda",
            DeploymentTarget::AwsEcs { .. } => "aws-ecs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_environment_wire_format() {
        let json = json!({
            "name": "staging",
            "tier": "staging",
            "promotesTo": "production",
            "providers": [
                {"type": "kubernetes", "cluster": "stg-1", "apiServer": "https://k8s.stg"},
                {"type": "aws", "accountId": "123456789012", "region": "eu-west-1"},
                {"type": "azure", "subscriptionId": "sub", "resourceGroup": "rg", "region": "westeurope"}
            ],
            "metadata": {"owner": "platform"}
        });

        let env: Environment = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(env.tier, EnvironmentTier::Staging);
        assert_eq!(env.providers.len(), 3);
        assert_eq!(env.providers[1].provider_type(), "aws");
        assert_eq!(serde_json::to_value(&env).unwrap(), json);
    }

    #[test]
    fn test_environment_defaults() {
        let env: Environment =
            serde_json::from_value(json!({"name": "dev", "tier": "development"})).unwrap();
        assert!(env.promotes_to.is_none());
        assert!(env.providers.is_empty());
        assert!(env.metadata.is_empty());

        let out = serde_json::to_value(&env).unwrap();
        assert!(out.get("promotesTo").is_none());
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let result: Result<Environment, _> =
            serde_json::from_value(json!({"name": "qa", "tier": "qa"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_provider_type_rejected() {
        let result: Result<ProviderConfig, _> =
            serde_json::from_value(json!({"type": "gcp", "project": "p"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_deployment_target_tags() {
        let targets: Vec<DeploymentTarget> = serde_json::from_value(json!([
            {"provider": "kubernetes", "namespace": "shop", "labelSelector": "app=hybris"},
            {"provider": "aws-lambda", "functionName": "checkout", "alias": "live"},
            {"provider": "aws-ecs", "cluster": "main", "serviceName": "api"}
        ]))
        .unwrap();

        assert_eq!(
            targets.iter().map(|t| t.provider()).collect::<Vec<_>>(),
            vec!["kubernetes", "aws-lambda", "aws-ecs"]
        );
        assert_eq!(
            targets[2],
            DeploymentTarget::AwsEcs {
                cluster: "main".to_string(),
                service_name: "api".to_string(),
            }
        );
    }

    #[test]
    fn test_deployment_target_round_trip() {
        let targets = vec![
            DeploymentTarget::Kubernetes {
                namespace: "shop".to_string(),
                label_selector: "app=hybris".to_string(),
                deployment_name: None,
            },
            DeploymentTarget::Kubernetes {
                namespace: "shop".to_string(),
                label_selector: "app=hybris".to_string(),
                deployment_name: Some("hybris-web".to_string()),
            },
            DeploymentTarget::AwsLambda {
                function_name: "checkout".to_string(),
                alias: None,
            },
            DeploymentTarget::AwsEcs {
                cluster: "main".to_string(),
                service_name: "api".to_string(),
            },
        ];

        let json = serde_json::to_value(&targets).unwrap();
        assert_eq!(
            json[0],
            json!({"provider": "kubernetes", "namespace": "shop", "labelSelector": "app=hybris"})
        );
        assert_eq!(json[1]["deploymentName"], json!("hybris-web"));
        assert_eq!(
            json[2],
            json!({"provider": "aws-lambda", "functionName": "checkout"})
        );

        let back: Vec<DeploymentTarget> = serde_json::from_value(json).unwrap();
        assert_eq!(back, targets);
    }

    #[test]
    fn test_redacted_drops_token() {
        let env = Environment {
            name: "prod".to_string(),
            tier: EnvironmentTier::Production,
            promotes_to: None,
            providers: vec![ProviderConfig::Kubernetes {
                cluster: "prod-1".to_string(),
                api_server: None,
                token: Some("secret-token".to_string()),
            }],
            metadata: Default::default(),
        };

        let redacted = env.redacted();
        match &redacted.providers[0] {
            ProviderConfig::Kubernetes { token, cluster, .. } => {
                assert!(token.is_none());
                assert_eq!(cluster, "prod-1");
            }
            _ => panic!("Expected Kubernetes provider"),
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(EnvironmentTier::Development < EnvironmentTier::Staging);
        assert!(EnvironmentTier::Staging < EnvironmentTier::Production);
        assert_eq!(EnvironmentTier::Production.to_string(), "production");
    }
}
