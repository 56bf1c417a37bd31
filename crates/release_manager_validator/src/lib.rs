//! # Release Manager Validator
//!
//! Conformance checks for Release Manager contract documents. The contract
//! shapes decode without checking cross-field invariants; this crate checks:
//!
//! - Environment uniqueness and promotion chains (unknown targets, cycles)
//! - Release and deployment fields (component references, replica counts)
//! - Configuration snapshots and schemas (duplicate keys, unmasked secrets)
//! - Diff counts and per-difference status shape
//! - Drift resolution consistency
//! - Matrix `allSameVersion` flags and pagination bounds
//!
//! ## Example
//!
//! ```rust
//! use release_manager_core::{ContractDocument, ContractValidator, ValidationContext};
//! use release_manager_validator::DocumentValidator;
//!
//! let document = ContractDocument::from_json(r#"{
//!     "kind": "releasePage",
//!     "data": {"items": [], "totalCount": 0, "limit": 50, "offset": 0}
//! }"#).unwrap();
//!
//! let report = DocumentValidator::new().validate(&document, &ValidationContext::new());
//! assert!(report.passed);
//! ```

mod configuration;
mod diff;
mod drift;
mod engine;
mod environment;
mod error;
mod matrix;
mod pagination;
mod release;

pub use configuration::*;
pub use diff::*;
pub use drift::*;
pub use engine::*;
pub use environment::*;
pub use error::*;
pub use matrix::*;
pub use pagination::*;
pub use release::*;
