//! Configuration snapshots and tracked-key schemas.

use crate::{DynamicValue, ReleaseManagerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Replacement shown instead of a secret value.
pub const SECRET_MASK: &str = "********";

/// Placeholder substituted with the environment name in schema paths.
pub const ENV_PLACEHOLDER: &str = "{env}";

/// A point-in-time snapshot of a component's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// When the snapshot was captured
    pub captured_at: DateTime<Utc>,

    /// Captured values
    pub values: Vec<ConfigValue>,
}

impl Configuration {
    pub fn new(captured_at: DateTime<Utc>, values: Vec<ConfigValue>) -> Self {
        Self {
            captured_at,
            values,
        }
    }

    /// Returns the first value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.iter().find(|v| v.key == key)
    }

    /// Returns a copy with every secret value masked.
    pub fn masked(&self) -> Self {
        Self {
            captured_at: self.captured_at,
            values: self.values.iter().map(ConfigValue::masked).collect(),
        }
    }
}

/// One configuration entry.
///
/// On the wire the value's type is carried in the `type` field. Decoding fails
/// when the tag disagrees with the value, except for a masked secret which
/// keeps its original tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfigValue", into = "RawConfigValue")]
pub struct ConfigValue {
    pub key: String,
    pub value: DynamicValue,
    pub value_type: ConfigValueType,
    /// Secret values must be masked before leaving trusted code
    pub secret: bool,
    pub source: ConfigSource,
    pub source_path: Option<String>,
}

impl ConfigValue {
    /// Creates a value, inferring its type tag from the data.
    ///
    /// Fails for `null`, which has no configuration type.
    pub fn new(
        key: impl Into<String>,
        value: DynamicValue,
        source: ConfigSource,
    ) -> crate::Result<Self> {
        let key = key.into();
        let value_type =
            ConfigValueType::of(&value).ok_or_else(|| ReleaseManagerError::InvalidConfigValue {
                key: key.clone(),
                declared: "any".to_string(),
                actual: value.type_name().to_string(),
            })?;
        Ok(Self {
            key,
            value,
            value_type,
            secret: false,
            source,
            source_path: None,
        })
    }

    /// Returns true if the value has been replaced with [`SECRET_MASK`].
    pub fn is_masked(&self) -> bool {
        self.secret && self.value.as_str() == Some(SECRET_MASK)
    }

    /// Returns a copy safe for untrusted consumers.
    pub fn masked(&self) -> Self {
        if self.secret {
            Self {
                value: DynamicValue::String(SECRET_MASK.to_string()),
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }

    /// Returns the value for display, masked if secret.
    pub fn display_value(&self) -> DynamicValue {
        if self.secret {
            DynamicValue::String(SECRET_MASK.to_string())
        } else {
            self.value.clone()
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfigValue {
    key: String,
    value: DynamicValue,
    #[serde(rename = "type")]
    value_type: ConfigValueType,
    #[serde(default)]
    secret: bool,
    source: ConfigSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_path: Option<String>,
}

impl TryFrom<RawConfigValue> for ConfigValue {
    type Error = ReleaseManagerError;

    fn try_from(raw: RawConfigValue) -> Result<Self, Self::Error> {
        let masked = raw.secret && raw.value.as_str() == Some(SECRET_MASK);
        if !masked && ConfigValueType::of(&raw.value) != Some(raw.value_type) {
            return Err(ReleaseManagerError::InvalidConfigValue {
                key: raw.key,
                declared: raw.value_type.to_string(),
                actual: raw.value.type_name().to_string(),
            });
        }
        Ok(ConfigValue {
            key: raw.key,
            value: raw.value,
            value_type: raw.value_type,
            secret: raw.secret,
            source: raw.source,
            source_path: raw.source_path,
        })
    }
}

impl From<ConfigValue> for RawConfigValue {
    fn from(value: ConfigValue) -> Self {
        RawConfigValue {
            key: value.key,
            value: value.value,
            value_type: value.value_type,
            secret: value.secret,
            source: value.source,
            source_path: value.source_path,
        }
    }
}

/// Type tag of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigValueType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl ConfigValueType {
    /// Returns the tag matching a value, or `None` for null.
    pub fn of(value: &DynamicValue) -> Option<Self> {
        match value {
            DynamicValue::Null => None,
            DynamicValue::Bool(_) => Some(ConfigValueType::Boolean),
            DynamicValue::Number(_) => Some(ConfigValueType::Number),
            DynamicValue::String(_) => Some(ConfigValueType::String),
            DynamicValue::Array(_) => Some(ConfigValueType::Array),
            DynamicValue::Object(_) => Some(ConfigValueType::Object),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigValueType::String => "string",
            ConfigValueType::Number => "number",
            ConfigValueType::Boolean => "boolean",
            ConfigValueType::Object => "object",
            ConfigValueType::Array => "array",
        }
    }
}

impl fmt::Display for ConfigValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// System a configuration value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    KubernetesConfigmap,
    KubernetesSecret,
    AwsSsm,
    AwsSecretsManager,
    AzureAppConfig,
    AzureKeyVault,
    Environment,
    Manual,
}

impl ConfigSource {
    /// Returns true for stores that only hold secrets.
    pub fn is_secret_store(&self) -> bool {
        matches!(
            self,
            ConfigSource::KubernetesSecret
                | ConfigSource::AwsSecretsManager
                | ConfigSource::AzureKeyVault
        )
    }
}

/// Declares a configuration key to track in every environment.
///
/// # Example
///
/// ```rust
/// use release_manager_core::{ConfigSchemaEntry, ConfigSource, ConfigValueType};
///
/// let entry = ConfigSchemaEntry {
///     key: "DB_HOST".to_string(),
///     value_type: ConfigValueType::String,
///     source: ConfigSource::AwsSsm,
///     path: "/hybris/{env}/db/host".to_string(),
///     secret: false,
/// };
/// assert_eq!(entry.resolve_path("staging"), "/hybris/staging/db/host");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSchemaEntry {
    pub key: String,

    #[serde(rename = "type")]
    pub value_type: ConfigValueType,

    pub source: ConfigSource,

    /// Location template, `{env}` is replaced with the environment name
    pub path: String,

    #[serde(default)]
    pub secret: bool,
}

impl ConfigSchemaEntry {
    /// Resolves the path template for one environment.
    pub fn resolve_path(&self, environment: &str) -> String {
        self.path.replace(ENV_PLACEHOLDER, environment)
    }

    pub fn has_env_placeholder(&self) -> bool {
        self.path.contains(ENV_PLACEHOLDER)
    }
}
