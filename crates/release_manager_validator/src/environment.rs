//! Environment list checks.
//!
//! Environment names are unique keys and promotion targets must resolve to
//! one of them. Following `promotesTo` from any environment must terminate.

use crate::ViolationError;
use release_manager_core::Environment;
use std::collections::{HashMap, HashSet};

/// Validates a set of environment definitions.
pub struct EnvironmentValidator;

impl EnvironmentValidator {
    /// Creates a new environment validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns a list of violations. An empty list indicates success.
    pub fn validate(&self, environments: &[Environment]) -> Vec<ViolationError> {
        let mut errors = Vec::new();
        let mut by_name: HashMap<&str, &Environment> = HashMap::new();

        for env in environments {
            if env.name.trim().is_empty() {
                errors.push(ViolationError::empty_field("Environment", "name"));
            }
            if by_name.insert(env.name.as_str(), env).is_some() {
                errors.push(ViolationError::DuplicateEnvironment {
                    name: env.name.clone(),
                });
            }
        }

        for env in environments {
            let Some(target) = env.promotion_target() else {
                continue;
            };
            if target == env.name {
                errors.push(ViolationError::SelfPromotion {
                    environment: env.name.clone(),
                });
                continue;
            }
            match by_name.get(target) {
                None => errors.push(ViolationError::UnknownPromotionTarget {
                    environment: env.name.clone(),
                    target: target.to_string(),
                }),
                Some(next) if next.tier < env.tier => {
                    errors.push(ViolationError::PromotionDowngrade {
                        from: env.name.clone(),
                        from_tier: env.tier.to_string(),
                        to: next.name.clone(),
                        to_tier: next.tier.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        errors.extend(self.find_cycles(environments, &by_name));
        errors
    }

    /// Reports each promotion cycle once, starting from its first member in
    /// input order.
    fn find_cycles(
        &self,
        environments: &[Environment],
        by_name: &HashMap<&str, &Environment>,
    ) -> Vec<ViolationError> {
        let mut errors = Vec::new();
        let mut reported: HashSet<&str> = HashSet::new();

        for start in environments {
            if reported.contains(start.name.as_str()) {
                continue;
            }
            let mut path = vec![start.name.as_str()];
            let mut current: &Environment = start;
            while let Some(next) = current
                .promotion_target()
                .filter(|t| *t != current.name)
                .and_then(|t| by_name.get(t).copied())
            {
                if next.name == start.name {
                    path.push(next.name.as_str());
                    reported.extend(path.iter().copied());
                    errors.push(ViolationError::PromotionCycle {
                        path: path.join(" -> "),
                    });
                    break;
                }
                if path.contains(&next.name.as_str()) {
                    // Cycle not through `start`; reported from one of its members.
                    break;
                }
                path.push(next.name.as_str());
                current = next;
            }
        }

        errors
    }
}

impl Default for EnvironmentValidator {
    fn default() -> Self {
        Self::new()
    }
}
