//! Catalog annotation keys.
//!
//! These keys are attached to catalog entities to carry Release Manager
//! metadata. They are part of the wire contract and must stay bit-exact.

/// Names the environments a component is deployed to.
pub const ENVIRONMENT: &str = "release-manager.io/environment";

/// Per-environment configuration values for a component.
pub const ENVIRONMENT_CONFIG: &str = "release-manager.io/config";

/// Deployment targets of a component, keyed by environment.
pub const DEPLOYMENTS: &str = "release-manager.io/deployments";

/// Declares which configuration keys are tracked for a component.
pub const CONFIG_SCHEMA: &str = "release-manager.io/config-schema";

/// The fixed mapping of annotation names to their keys.
pub const ALL: [(&str, &str); 4] = [
    ("ENVIRONMENT", ENVIRONMENT),
    ("ENVIRONMENT_CONFIG", ENVIRONMENT_CONFIG),
    ("DEPLOYMENTS", DEPLOYMENTS),
    ("CONFIG_SCHEMA", CONFIG_SCHEMA),
];

/// Prefix shared by every annotation key.
pub const PREFIX: &str = "release-manager.io/";

/// Looks up an annotation key by its constant name (e.g. `"DEPLOYMENTS"`).
pub fn lookup(name: &str) -> Option<&'static str> {
    ALL.iter().find(|(n, _)| *n == name).map(|(_, key)| *key)
}

/// Returns true if `key` is one of the Release Manager annotation keys.
pub fn is_release_manager_key(key: &str) -> bool {
    ALL.iter().any(|(_, k)| *k == key)
}
