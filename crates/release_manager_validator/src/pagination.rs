//! Page and filter checks.

use crate::ViolationError;
use chrono::{DateTime, Utc};
use release_manager_core::{DriftFilter, PaginatedResponse, ReleaseFilter};

/// Validates paginated responses and query filters.
pub struct PaginationValidator;

impl PaginationValidator {
    /// Creates a new pagination validator.
    pub fn new() -> Self {
        Self
    }

    /// Checks page bounds: `items <= limit` and `offset + items <= totalCount`.
    pub fn validate_page<T>(&self, page: &PaginatedResponse<T>) -> Vec<ViolationError> {
        let mut errors = Vec::new();
        let items = page.items.len();

        if items > page.limit {
            errors.push(ViolationError::PageOverLimit {
                items,
                limit: page.limit,
            });
        }
        if page.offset.saturating_add(items) > page.total_count {
            errors.push(ViolationError::PageBeyondTotal {
                offset: page.offset,
                items,
                total: page.total_count,
            });
        }

        errors
    }

    pub fn validate_release_filter(&self, filter: &ReleaseFilter) -> Vec<ViolationError> {
        check_query("ReleaseFilter", filter.since, filter.until, filter.limit)
    }

    pub fn validate_drift_filter(&self, filter: &DriftFilter) -> Vec<ViolationError> {
        check_query("DriftFilter", filter.since, filter.until, filter.limit)
    }
}

impl Default for PaginationValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn check_query(
    context: &str,
    since: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
    limit: Option<usize>,
) -> Vec<ViolationError> {
    let mut errors = Vec::new();

    if limit == Some(0) {
        errors.push(ViolationError::ZeroLimit {
            context: context.to_string(),
        });
    }
    if let (Some(since), Some(until)) = (since, until) {
        if since > until {
            errors.push(ViolationError::InvertedRange {
                context: context.to_string(),
                since: since.to_rfc3339(),
                until: until.to_rfc3339(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_bounds() {
        let validator = PaginationValidator::new();

        let ok = PaginatedResponse::page(vec![1, 2, 3, 4], 2, 2);
        assert!(validator.validate_page(&ok).is_empty());

        let past_end = PaginatedResponse::page(vec![1, 2], 10, 5);
        assert!(validator.validate_page(&past_end).is_empty());

        let bad = PaginatedResponse {
            items: vec![1, 2, 3],
            total_count: 4,
            limit: 2,
            offset: 2,
        };
        assert_eq!(
            validator.validate_page(&bad),
            vec![
                ViolationError::PageOverLimit { items: 3, limit: 2 },
                ViolationError::PageBeyondTotal {
                    offset: 2,
                    items: 3,
                    total: 4,
                },
            ]
        );
    }

    #[test]
    fn test_filter_checks() {
        let now = Utc::now();
        let filter = ReleaseFilter {
            since: Some(now),
            until: Some(now - Duration::days(1)),
            limit: Some(0),
            ..Default::default()
        };

        let errors = PaginationValidator::new().validate_release_filter(&filter);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ViolationError::ZeroLimit { .. }));
        assert!(matches!(errors[1], ViolationError::InvertedRange { .. }));

        assert!(
            PaginationValidator::new()
                .validate_drift_filter(&DriftFilter::default())
                .is_empty()
        );
    }
}
