//! DriftEvent checks.

use crate::ViolationError;
use release_manager_core::DriftEvent;

/// Validates drift events.
pub struct DriftValidator;

impl DriftValidator {
    /// Creates a new drift validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns a list of violations. An empty list indicates success.
    pub fn validate(&self, event: &DriftEvent) -> Vec<ViolationError> {
        let mut errors = Vec::new();

        if event.id.is_empty() {
            errors.push(ViolationError::empty_field("DriftEvent", "id"));
        }
        if event.environment.is_empty() {
            errors.push(ViolationError::empty_field(
                format!("DriftEvent '{}'", event.id),
                "environment",
            ));
        }

        if !event.resolution_consistent() {
            errors.push(ViolationError::ResolvedByWithoutResolvedAt {
                id: event.id.clone(),
            });
        }

        if let Some(resolved_at) = event.resolved_at {
            if resolved_at < event.detected_at {
                errors.push(ViolationError::ResolvedBeforeDetected {
                    id: event.id.clone(),
                });
            }
        }

        errors
    }
}

impl Default for DriftValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use release_manager_core::DriftType;

    fn event() -> DriftEvent {
        DriftEvent::open(
            "drift-1",
            "component:default/api",
            "prod",
            DriftType::ReplicaChanged,
            3i64.into(),
            2i64.into(),
            Utc::now(),
        )
    }

    #[test]
    fn test_open_and_resolved_events_pass() {
        let open = event();
        let resolved = open
            .clone()
            .resolve(open.detected_at + Duration::minutes(5), Some("ops".to_string()));

        assert!(DriftValidator::new().validate(&open).is_empty());
        assert!(DriftValidator::new().validate(&resolved).is_empty());
    }

    #[test]
    fn test_resolved_by_requires_resolved_at() {
        let mut e = event();
        e.resolved_by = Some("ops".to_string());

        let errors = DriftValidator::new().validate(&e);
        assert_eq!(
            errors,
            vec![ViolationError::ResolvedByWithoutResolvedAt {
                id: "drift-1".to_string()
            }]
        );
    }

    #[test]
    fn test_resolved_before_detected() {
        let mut e = event();
        e.resolved_at = Some(e.detected_at - Duration::hours(1));

        let errors = DriftValidator::new().validate(&e);
        assert!(matches!(errors[0], ViolationError::ResolvedBeforeDetected { .. }));
    }
}
