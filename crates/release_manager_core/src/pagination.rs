//! Paginated responses and query filters.

use crate::{DriftEvent, DriftType, Release, ReleaseSource, ReleaseStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size used when a filter does not set `limit`.
pub const DEFAULT_LIMIT: usize = 50;

/// Largest page size a filter may request.
pub const MAX_LIMIT: usize = 500;

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> PaginatedResponse<T> {
    /// Slices one page out of the full result set.
    ///
    /// An offset past the end is clamped to `total_count`, so the page is
    /// empty but still consistent.
    pub fn page(all: Vec<T>, limit: usize, offset: usize) -> Self {
        let total_count = all.len();
        let offset = offset.min(total_count);
        let items = all.into_iter().skip(offset).take(limit).collect();
        Self {
            items,
            total_count,
            limit,
            offset,
        }
    }

    /// Returns true if the page fits its declared limit and total.
    pub fn is_consistent(&self) -> bool {
        self.items.len() <= self.limit
            && self.offset.saturating_add(self.items.len()) <= self.total_count
    }

    /// Returns true if more items follow this page.
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len()) < self.total_count
    }
}

/// Query parameters for listing releases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReleaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ReleaseSource>,
    /// Inclusive lower bound on `deployedAt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `deployedAt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl ReleaseFilter {
    pub fn matches(&self, release: &Release) -> bool {
        self.component_ref
            .as_ref()
            .is_none_or(|c| *c == release.component_ref)
            && self
                .environment
                .as_ref()
                .is_none_or(|e| *e == release.environment)
            && self.status.is_none_or(|s| s == release.status)
            && self.source.is_none_or(|s| s == release.source)
            && in_range(release.deployed_at, self.since, self.until)
    }

    /// Filters releases, newest first, and returns the requested page.
    pub fn apply(&self, releases: &[Release]) -> PaginatedResponse<Release> {
        let mut matching: Vec<Release> = releases
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.deployed_at.cmp(&a.deployed_at));
        PaginatedResponse::page(
            matching,
            effective_limit(self.limit),
            self.offset.unwrap_or(0),
        )
    }
}

/// Query parameters for listing drift events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_type: Option<DriftType>,
    /// `Some(false)` selects open events only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    /// Inclusive lower bound on `detectedAt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `detectedAt`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl DriftFilter {
    pub fn matches(&self, event: &DriftEvent) -> bool {
        self.component_ref
            .as_ref()
            .is_none_or(|c| *c == event.component_ref)
            && self
                .environment
                .as_ref()
                .is_none_or(|e| *e == event.environment)
            && self.drift_type.is_none_or(|t| t == event.drift_type)
            && self.resolved.is_none_or(|r| r == event.is_resolved())
            && in_range(event.detected_at, self.since, self.until)
    }

    /// Filters events, most recently detected first, and returns the requested page.
    pub fn apply(&self, events: &[DriftEvent]) -> PaginatedResponse<DriftEvent> {
        let mut matching: Vec<DriftEvent> = events
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.detected_at.cmp(&a.detected_at));
        PaginatedResponse::page(
            matching,
            effective_limit(self.limit),
            self.offset.unwrap_or(0),
        )
    }
}

/// Resolves a requested page size against the default and maximum.
pub fn effective_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

fn in_range(at: DateTime<Utc>, since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> bool {
    since.is_none_or(|s| at >= s) && until.is_none_or(|u| at <= u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReleaseBuilder;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()
    }

    fn releases() -> Vec<Release> {
        (1..=5)
            .map(|day| {
                ReleaseBuilder::new(
                    format!("rel-{day}"),
                    "component:default/api",
                    if day % 2 == 0 { "prod" } else { "dev" },
                    format!("1.{day}"),
                    at(day),
                )
                .status(if day == 5 {
                    ReleaseStatus::Failed
                } else {
                    ReleaseStatus::Success
                })
                .build()
            })
            .collect()
    }

    #[test]
    fn test_page_slices_and_stays_consistent() {
        let page = PaginatedResponse::page((0..10).collect::<Vec<_>>(), 3, 8);
        assert_eq!(page.items, vec![8, 9]);
        assert_eq!(page.total_count, 10);
        assert!(page.is_consistent());
        assert!(!page.has_more());

        let past_end = PaginatedResponse::page(vec![1, 2], 10, 5);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.offset, 2);
        assert_eq!(past_end.total_count, 2);
        assert!(past_end.is_consistent());
    }

    #[test]
    fn test_filter_apply_past_end_is_consistent() {
        let filter = ReleaseFilter {
            offset: Some(99),
            ..Default::default()
        };
        let page = filter.apply(&releases());
        assert!(page.items.is_empty());
        assert_eq!(page.offset, 5);
        assert!(page.is_consistent());
    }

    #[test]
    fn test_page_round_trip() {
        let page = PaginatedResponse::page(releases(), 2, 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], json!(5));
        assert_eq!(json["offset"], json!(1));

        let back: PaginatedResponse<Release> = serde_json::from_value(json).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn test_filters_round_trip() {
        let release_filter = ReleaseFilter {
            component_ref: Some("component:default/api".to_string()),
            environment: Some("prod".to_string()),
            status: Some(ReleaseStatus::Failed),
            source: Some(ReleaseSource::Argocd),
            since: Some(at(1)),
            until: Some(at(3)),
            limit: Some(10),
            offset: Some(20),
        };
        let json = serde_json::to_value(&release_filter).unwrap();
        let back: ReleaseFilter = serde_json::from_value(json).unwrap();
        assert_eq!(back, release_filter);

        let drift_filter = DriftFilter {
            component_ref: Some("component:default/api".to_string()),
            drift_type: Some(DriftType::ReplicaChanged),
            resolved: Some(true),
            until: Some(at(2)),
            ..Default::default()
        };
        let json = serde_json::to_value(&drift_filter).unwrap();
        assert!(json.get("environment").is_none());
        let back: DriftFilter = serde_json::from_value(json).unwrap();
        assert_eq!(back, drift_filter);

        let empty = serde_json::to_value(ReleaseFilter::default()).unwrap();
        assert_eq!(empty, json!({}));
    }

    #[test]
    fn test_inconsistent_pages() {
        let too_many = PaginatedResponse {
            items: vec![1, 2, 3],
            total_count: 3,
            limit: 2,
            offset: 0,
        };
        assert!(!too_many.is_consistent());

        let beyond_total = PaginatedResponse {
            items: vec![1, 2],
            total_count: 3,
            limit: 2,
            offset: 2,
        };
        assert!(!beyond_total.is_consistent());
    }

    #[test]
    fn test_release_filter_apply() {
        let filter = ReleaseFilter {
            environment: Some("dev".to_string()),
            status: Some(ReleaseStatus::Success),
            ..Default::default()
        };
        let page = filter.apply(&releases());

        let ids: Vec<&str> = page.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rel-3", "rel-1"]);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_release_filter_date_range_is_inclusive() {
        let filter = ReleaseFilter {
            since: Some(at(2)),
            until: Some(at(4)),
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        };
        let page = filter.apply(&releases());

        assert_eq!(page.total_count, 3);
        let ids: Vec<&str> = page.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rel-3", "rel-2"]);
    }

    #[test]
    fn test_drift_filter_resolved() {
        let open = DriftEvent::open(
            "d1",
            "component:default/api",
            "prod",
            DriftType::VersionChanged,
            "1".into(),
            "2".into(),
            at(1),
        );
        let closed = open.clone().resolve(at(2), None);

        let filter = DriftFilter {
            resolved: Some(false),
            ..Default::default()
        };
        assert!(filter.matches(&open));
        assert!(!filter.matches(&closed));
        assert_eq!(DriftFilter::default().apply(&[open, closed]).total_count, 2);
    }

    #[test]
    fn test_filter_wire_format() {
        let filter: ReleaseFilter = serde_json::from_value(json!({
            "componentRef": "component:default/api",
            "status": "in_progress",
            "since": "2024-05-01T00:00:00Z",
            "limit": 20
        }))
        .unwrap();

        assert_eq!(filter.status, Some(ReleaseStatus::InProgress));
        assert_eq!(filter.since, Some(at(1)));
        assert!(filter.offset.is_none());
    }

    #[test]
    fn test_effective_limit_is_capped() {
        assert_eq!(effective_limit(None), DEFAULT_LIMIT);
        assert_eq!(effective_limit(Some(10_000)), MAX_LIMIT);
    }
}
