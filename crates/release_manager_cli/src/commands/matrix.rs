use anyhow::{Context, Result};
use chrono::Utc;
use release_manager_core::{DriftEvent, Release, ReleaseMatrix};
use release_manager_parser::{parse_environments_file, parse_file};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(
    environments_path: &str,
    releases_path: &str,
    drift_path: Option<&str>,
    format: &str,
) -> Result<()> {
    info!("Building release matrix from {}", releases_path);

    let environments = parse_environments_file(Path::new(environments_path))
        .with_context(|| format!("Failed to parse environments file: {}", environments_path))?;
    let releases: Vec<Release> = parse_file(Path::new(releases_path))
        .with_context(|| format!("Failed to parse releases: {}", releases_path))?;

    let names = environments.into_iter().map(|env| env.name).collect();
    let mut matrix = ReleaseMatrix::from_releases(names, &releases, Utc::now());

    if let Some(drift_path) = drift_path {
        let events: Vec<DriftEvent> = parse_file(Path::new(drift_path))
            .with_context(|| format!("Failed to parse drift events: {}", drift_path))?;
        info!("Overlaying {} drift event(s)", events.len());
        matrix = matrix.with_drift(&events);
    }

    output::print_matrix(&matrix, format)
}
