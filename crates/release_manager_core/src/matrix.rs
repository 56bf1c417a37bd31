//! Release matrix: one row per component, one cell per environment.
//!
//! The matrix is derived data. [`ReleaseMatrix::from_releases`] builds it from
//! the release log; live deployment state and open drift can be layered on top.

use crate::{DeploymentInfo, DriftEvent, Release, ReleaseStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Component × environment overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMatrix {
    /// Environment names in display order
    pub environments: Vec<String>,

    /// One row per component, sorted by component reference
    pub rows: Vec<ReleaseMatrixRow>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// A component's state across environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMatrixRow {
    pub component_ref: String,

    /// Cells keyed by environment name
    pub cells: BTreeMap<String, ReleaseMatrixCell>,

    /// True when every cell with a version shows the same version
    pub all_same_version: bool,
}

/// A component's state in one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseMatrixCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,

    #[serde(default)]
    pub has_drift: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_deployed: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReleaseStatus>,
}

impl ReleaseMatrixRow {
    /// Builds a row, computing `all_same_version` from the cells.
    pub fn new(
        component_ref: impl Into<String>,
        cells: BTreeMap<String, ReleaseMatrixCell>,
    ) -> Self {
        let all_same_version = all_same_version(&cells);
        Self {
            component_ref: component_ref.into(),
            cells,
            all_same_version,
        }
    }

    /// Recomputes `all_same_version` from the cells.
    pub fn compute_all_same_version(&self) -> bool {
        all_same_version(&self.cells)
    }

    fn refresh(&mut self) {
        self.all_same_version = all_same_version(&self.cells);
    }
}

/// Zero or one versioned cell trivially agrees.
pub fn all_same_version(cells: &BTreeMap<String, ReleaseMatrixCell>) -> bool {
    let mut versions = cells.values().filter_map(|c| c.version.as_deref());
    match versions.next() {
        Some(first) => versions.all(|v| v == first),
        None => true,
    }
}

impl ReleaseMatrix {
    /// Builds the matrix from the release log.
    ///
    /// Each cell shows the most recently deployed release for that component and
    /// environment. Releases to environments not listed are ignored.
    pub fn from_releases(
        environments: Vec<String>,
        releases: &[Release],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut latest: BTreeMap<&str, BTreeMap<&str, &Release>> = BTreeMap::new();
        for release in releases {
            if !environments.contains(&release.environment) {
                continue;
            }
            let slot = latest
                .entry(release.component_ref.as_str())
                .or_default()
                .entry(release.environment.as_str())
                .or_insert(release);
            if release.deployed_at >= slot.deployed_at {
                *slot = release;
            }
        }

        let rows = latest
            .into_iter()
            .map(|(component, by_env)| {
                let cells = by_env
                    .into_iter()
                    .map(|(env, release)| (env.to_string(), cell_from_release(release)))
                    .collect();
                ReleaseMatrixRow::new(component, cells)
            })
            .collect();

        Self {
            environments,
            rows,
            generated_at: Some(generated_at),
        }
    }

    /// Overlays live deployment state: running version and health.
    pub fn with_deployments(mut self, deployments: &[DeploymentInfo]) -> Self {
        for info in deployments {
            if !self.environments.contains(&info.environment) {
                continue;
            }
            let cell = self.cell_mut(&info.component_ref, &info.environment);
            cell.version = Some(info.version.clone());
            cell.healthy = Some(info.healthy);
        }
        self.finish()
    }

    /// Flags cells that have at least one open drift event.
    pub fn with_drift(mut self, events: &[DriftEvent]) -> Self {
        for event in events.iter().filter(|e| !e.is_resolved()) {
            if !self.environments.contains(&event.environment) {
                continue;
            }
            self.cell_mut(&event.component_ref, &event.environment)
                .has_drift = true;
        }
        self.finish()
    }

    /// Returns the row for a component.
    pub fn row(&self, component_ref: &str) -> Option<&ReleaseMatrixRow> {
        self.rows.iter().find(|r| r.component_ref == component_ref)
    }

    fn cell_mut(&mut self, component_ref: &str, environment: &str) -> &mut ReleaseMatrixCell {
        let idx = match self
            .rows
            .iter()
            .position(|r| r.component_ref == component_ref)
        {
            Some(idx) => idx,
            None => {
                self.rows
                    .push(ReleaseMatrixRow::new(component_ref, BTreeMap::new()));
                self.rows.len() - 1
            }
        };
        self.rows[idx]
            .cells
            .entry(environment.to_string())
            .or_default()
    }

    fn finish(mut self) -> Self {
        self.rows
            .sort_by(|a, b| a.component_ref.cmp(&b.component_ref));
        self.rows.iter_mut().for_each(ReleaseMatrixRow::refresh);
        self
    }
}

fn cell_from_release(release: &Release) -> ReleaseMatrixCell {
    ReleaseMatrixCell {
        version: Some(release.version.clone()),
        healthy: match release.status {
            ReleaseStatus::Success => Some(true),
            ReleaseStatus::Failed => Some(false),
            ReleaseStatus::InProgress | ReleaseStatus::Unknown => None,
        },
        has_drift: false,
        last_deployed: Some(release.deployed_at),
        status: Some(release.status),
    }
}
