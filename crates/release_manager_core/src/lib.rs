//! # Release Manager Core
//!
//! Shared data contracts for the Release Manager frontend and backend plugins.
//!
//! This crate declares every shape the two plugins exchange: environments and
//! their provider configuration, releases, live deployment state, configuration
//! snapshots and their diffs, drift events and the release matrix overview. It
//! also exposes the annotation keys used on catalog entities.
//!
//! ## Key Concepts
//!
//! - **Environment**: A named deployment stage with a tier and provider settings
//! - **Release**: An immutable record of one deployment of a component
//! - **Configuration**: A point-in-time snapshot of the keys tracked for a component
//! - **ConfigDiff**: A key-by-key comparison of two environments' snapshots
//! - **DriftEvent**: A detected divergence between expected and actual state
//! - **ReleaseMatrix**: A component × environment overview of deployed versions
//!
//! ## Example
//!
//! ```rust
//! use release_manager_core::{ConfigDiff, ConfigValueBuilder, Configuration, DiffStatus};
//! use chrono::Utc;
//!
//! let staging = Configuration::new(
//!     Utc::now(),
//!     vec![ConfigValueBuilder::new("DB_HOST", "a").build().unwrap()],
//! );
//! let production = Configuration::new(Utc::now(), vec![]);
//!
//! let diff = ConfigDiff::compare("component:default/hybris", "staging", &staging, "production", &production);
//! assert_eq!(diff.missing_count, 1);
//! assert_eq!(diff.differences[0].status, DiffStatus::Missing);
//! ```

pub mod annotations;
pub mod builder;
pub mod config;
pub mod diff;
pub mod document;
pub mod drift;
pub mod environment;
pub mod error;
pub mod matrix;
pub mod pagination;
pub mod release;
pub mod validator;
pub mod value;

pub use builder::*;
pub use config::*;
pub use diff::*;
pub use document::*;
pub use drift::*;
pub use environment::*;
pub use error::*;
pub use matrix::*;
pub use pagination::*;
pub use release::*;
pub use validator::*;
pub use value::*;
