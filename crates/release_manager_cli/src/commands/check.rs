use anyhow::{Context, Result};
use release_manager_parser::parse_environments_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(environments_path: &str) -> Result<()> {
    info!("Checking environments: {}", environments_path);

    let path = Path::new(environments_path);
    let environments = parse_environments_file(path)
        .with_context(|| format!("Failed to parse environments file: {}", environments_path))?;

    output::print_info(&format!("Loaded {} environment(s)", environments.len()));
    output::print_success("Environments file is well-formed");

    println!("\nEnvironments:");
    for env in &environments {
        println!(
            "  {:<16} {:<12} -> {}",
            env.name,
            env.tier.as_str(),
            env.promotion_target().unwrap_or("N/A")
        );
        for provider in &env.providers {
            println!("    provider: {}", provider.provider_type());
        }
    }

    Ok(())
}
