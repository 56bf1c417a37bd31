//! Builder pattern for creating contract values.
//!
//! Required fields are taken by `new`, so `build` cannot fail except where a
//! value's type has to be inferred.

use crate::{
    ConfigSource, ConfigValue, Configuration, DynamicValue, Environment, EnvironmentTier,
    Metadata, ProviderConfig, Release, ReleaseSource, ReleaseStatus,
};
use chrono::{DateTime, Utc};

/// Builder for creating an `Environment`.
///
/// # Example
///
/// ```rust
/// use release_manager_core::{EnvironmentBuilder, EnvironmentTier};
///
/// let env = EnvironmentBuilder::new("staging", EnvironmentTier::Staging)
///     .promotes_to("production")
///     .metadata("region", "eu-west-1")
///     .build();
/// assert_eq!(env.promotion_target(), Some("production"));
/// ```
#[derive(Debug)]
pub struct EnvironmentBuilder {
    name: String,
    tier: EnvironmentTier,
    promotes_to: Option<String>,
    providers: Vec<ProviderConfig>,
    metadata: Metadata,
}

impl EnvironmentBuilder {
    pub fn new(name: impl Into<String>, tier: EnvironmentTier) -> Self {
        Self {
            name: name.into(),
            tier,
            promotes_to: None,
            providers: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Sets the environment releases are promoted to.
    pub fn promotes_to(mut self, target: impl Into<String>) -> Self {
        self.promotes_to = Some(target.into());
        self
    }

    /// Adds a provider configuration.
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.providers.push(provider);
        self
    }

    /// Adds a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Environment {
        Environment {
            name: self.name,
            tier: self.tier,
            promotes_to: self.promotes_to,
            providers: self.providers,
            metadata: self.metadata,
        }
    }
}

/// Builder for creating a `Release`.
///
/// Defaults to source `manual` and status `unknown`.
///
/// # Example
///
/// ```rust
/// use release_manager_core::{ReleaseBuilder, ReleaseSource, ReleaseStatus};
/// use chrono::Utc;
///
/// let release = ReleaseBuilder::new("rel-42", "component:default/hybris", "staging", "2.4.0", Utc::now())
///     .image_tag("2.4.0-b17")
///     .source(ReleaseSource::Argocd)
///     .status(ReleaseStatus::Success)
///     .build();
/// assert!(release.configuration.is_none());
/// ```
#[derive(Debug)]
pub struct ReleaseBuilder {
    id: String,
    component_ref: String,
    environment: String,
    version: String,
    deployed_at: DateTime<Utc>,
    image_tag: Option<String>,
    deployed_by: Option<String>,
    source: ReleaseSource,
    status: ReleaseStatus,
    configuration: Option<Configuration>,
    metadata: Metadata,
}

impl ReleaseBuilder {
    pub fn new(
        id: impl Into<String>,
        component_ref: impl Into<String>,
        environment: impl Into<String>,
        version: impl Into<String>,
        deployed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            component_ref: component_ref.into(),
            environment: environment.into(),
            version: version.into(),
            deployed_at,
            image_tag: None,
            deployed_by: None,
            source: ReleaseSource::Manual,
            status: ReleaseStatus::Unknown,
            configuration: None,
            metadata: Metadata::new(),
        }
    }

    pub fn image_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tag = Some(tag.into());
        self
    }

    pub fn deployed_by(mut self, actor: impl Into<String>) -> Self {
        self.deployed_by = Some(actor.into());
        self
    }

    pub fn source(mut self, source: ReleaseSource) -> Self {
        self.source = source;
        self
    }

    pub fn status(mut self, status: ReleaseStatus) -> Self {
        self.status = status;
        self
    }

    /// Attaches the configuration snapshot captured at deploy time.
    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Release {
        Release {
            id: self.id,
            component_ref: self.component_ref,
            environment: self.environment,
            version: self.version,
            image_tag: self.image_tag,
            deployed_at: self.deployed_at,
            deployed_by: self.deployed_by,
            source: self.source,
            status: self.status,
            configuration: self.configuration,
            metadata: self.metadata,
        }
    }
}

/// Builder for creating a `ConfigValue`.
///
/// The `type` tag is inferred from the value. Defaults to source `manual`.
#[derive(Debug)]
pub struct ConfigValueBuilder {
    key: String,
    value: DynamicValue,
    secret: bool,
    source: ConfigSource,
    source_path: Option<String>,
}

impl ConfigValueBuilder {
    pub fn new(key: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            secret: false,
            source: ConfigSource::Manual,
            source_path: None,
        }
    }

    pub fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }

    pub fn source(mut self, source: ConfigSource) -> Self {
        self.source = source;
        self
    }

    pub fn source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Builds the value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfigValue` if the value is null.
    pub fn build(self) -> crate::Result<ConfigValue> {
        let mut value = ConfigValue::new(self.key, self.value, self.source)?;
        value.secret = self.secret;
        value.source_path = self.source_path;
        Ok(value)
    }
}
