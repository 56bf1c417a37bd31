//! Configuration comparison between two environments.
//!
//! A [`ConfigDiff`] carries denormalized counts next to its differences.
//! [`ConfigDiff::compare`] and [`ConfigDiff::new`] keep them consistent; data
//! received from elsewhere should be checked with [`ConfigDiff::counts_consistent`].

use crate::{ConfigValue, Configuration, DynamicValue, SECRET_MASK};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Comparison of one component's configuration across two environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDiff {
    pub component_ref: String,
    pub environment1: String,
    pub environment2: String,
    pub differences: Vec<ConfigDifference>,
    pub same_count: usize,
    pub different_count: usize,
    pub missing_count: usize,
}

/// One key compared across two environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDifference {
    pub key: String,

    /// Value in the first environment, `null` when the key is missing there
    pub value1: Option<DynamicValue>,

    /// Value in the second environment, `null` when the key is missing there
    pub value2: Option<DynamicValue>,

    pub status: DiffStatus,

    /// Whether either side is a secret; values are masked when set
    #[serde(default)]
    pub secret: bool,
}

/// Outcome of comparing one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    /// Equal in both environments
    Same,
    /// Present in both, values differ
    Different,
    /// Differs, and is declared environment-specific
    Expected,
    /// Differs from what was expected
    Drift,
    /// Present in only one environment
    Missing,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::Same => "same",
            DiffStatus::Different => "different",
            DiffStatus::Expected => "expected",
            DiffStatus::Drift => "drift",
            DiffStatus::Missing => "missing",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of differences by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffCounts {
    pub same: usize,
    pub different: usize,
    pub missing: usize,
}

impl ConfigDiff {
    /// Builds a diff from its differences, computing the counts.
    pub fn new(
        component_ref: impl Into<String>,
        environment1: impl Into<String>,
        environment2: impl Into<String>,
        differences: Vec<ConfigDifference>,
    ) -> Self {
        let counts = tally(&differences);
        Self {
            component_ref: component_ref.into(),
            environment1: environment1.into(),
            environment2: environment2.into(),
            differences,
            same_count: counts.same,
            different_count: counts.different,
            missing_count: counts.missing,
        }
    }

    /// Compares two configuration snapshots key by key.
    ///
    /// Keys are reported in sorted order. When a snapshot lists a key twice the
    /// first occurrence is used.
    pub fn compare(
        component_ref: impl Into<String>,
        environment1: impl Into<String>,
        config1: &Configuration,
        environment2: impl Into<String>,
        config2: &Configuration,
    ) -> Self {
        Self::compare_with_expected(
            component_ref,
            environment1,
            config1,
            environment2,
            config2,
            std::iter::empty::<&str>(),
        )
    }

    /// Compares two snapshots, marking differing keys in `expected_keys` as
    /// [`DiffStatus::Expected`] instead of [`DiffStatus::Different`].
    pub fn compare_with_expected<'a>(
        component_ref: impl Into<String>,
        environment1: impl Into<String>,
        config1: &Configuration,
        environment2: impl Into<String>,
        config2: &Configuration,
        expected_keys: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let expected: HashSet<&str> = expected_keys.into_iter().collect();
        let left = index(config1);
        let right = index(config2);

        let keys: BTreeSet<&str> = left.keys().chain(right.keys()).copied().collect();
        let differences = keys
            .into_iter()
            .map(|key| {
                let a = left.get(key).copied();
                let b = right.get(key).copied();
                let status = match (a, b) {
                    (Some(a), Some(b)) if a.value.same_value(&b.value) => DiffStatus::Same,
                    (Some(_), Some(_)) if expected.contains(key) => DiffStatus::Expected,
                    (Some(_), Some(_)) => DiffStatus::Different,
                    _ => DiffStatus::Missing,
                };
                let secret = a.is_some_and(|v| v.secret) || b.is_some_and(|v| v.secret);
                ConfigDifference {
                    key: key.to_string(),
                    value1: a.map(|v| shown(v, secret)),
                    value2: b.map(|v| shown(v, secret)),
                    status,
                    secret,
                }
            })
            .collect();

        Self::new(component_ref, environment1, environment2, differences)
    }

    /// Recounts the differences by status.
    pub fn tally(&self) -> DiffCounts {
        tally(&self.differences)
    }

    /// Returns true if the declared counts match the differences.
    pub fn counts_consistent(&self) -> bool {
        let counts = self.tally();
        counts.same == self.same_count
            && counts.different == self.different_count
            && counts.missing == self.missing_count
    }

    /// Returns the differences that need attention (not `same`).
    pub fn changed(&self) -> impl Iterator<Item = &ConfigDifference> {
        self.differences
            .iter()
            .filter(|d| d.status != DiffStatus::Same)
    }
}

fn index(config: &Configuration) -> BTreeMap<&str, &ConfigValue> {
    let mut map = BTreeMap::new();
    for value in &config.values {
        map.entry(value.key.as_str()).or_insert(value);
    }
    map
}

fn shown(value: &ConfigValue, secret: bool) -> DynamicValue {
    if secret {
        DynamicValue::String(SECRET_MASK.to_string())
    } else {
        value.value.clone()
    }
}

fn tally(differences: &[ConfigDifference]) -> DiffCounts {
    differences
        .iter()
        .fold(DiffCounts::default(), |mut counts, d| {
            match d.status {
                DiffStatus::Same => counts.same += 1,
                DiffStatus::Different => counts.different += 1,
                DiffStatus::Missing => counts.missing += 1,
                DiffStatus::Expected | DiffStatus::Drift => {}
            }
            counts
        })
}
