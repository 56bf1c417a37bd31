use anyhow::{Context, Result};
use release_manager_core::{ConfigDiff, Configuration};
use release_manager_parser::parse_file;
use std::path::Path;
use tracing::{debug, info};

use crate::output;

pub fn execute(
    config1_path: &str,
    config2_path: &str,
    component: &str,
    env1: &str,
    env2: &str,
    expected: &[String],
    format: &str,
) -> Result<()> {
    info!("Comparing {} ({}) with {} ({})", env1, config1_path, env2, config2_path);

    let config1: Configuration = parse_file(Path::new(config1_path))
        .with_context(|| format!("Failed to parse configuration: {}", config1_path))?;
    let config2: Configuration = parse_file(Path::new(config2_path))
        .with_context(|| format!("Failed to parse configuration: {}", config2_path))?;
    debug!(
        left = config1.values.len(),
        right = config2.values.len(),
        expected = expected.len(),
        "Loaded snapshots"
    );

    let diff = ConfigDiff::compare_with_expected(
        component,
        env1,
        &config1,
        env2,
        &config2,
        expected.iter().map(String::as_str),
    );

    output::print_diff(&diff, format)
}
