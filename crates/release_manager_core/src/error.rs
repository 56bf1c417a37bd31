//! Error types for the release manager contracts.

use thiserror::Error;

/// Result type for release manager operations.
pub type Result<T> = std::result::Result<T, ReleaseManagerError>;

/// Main error type for release manager operations.
#[derive(Error, Debug)]
pub enum ReleaseManagerError {
    /// Configuration value does not match its declared type
    #[error("Invalid config value '{key}': declared type {declared}, got {actual}")]
    InvalidConfigValue {
        /// Configuration key
        key: String,
        /// Declared `type` tag
        declared: String,
        /// Type of the actual value
        actual: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
