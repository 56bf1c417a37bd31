use anyhow::{Context, Result, bail};
use release_manager_core::Configuration;
use release_manager_parser::parse_file;
use std::path::Path;
use tracing::info;

pub fn execute(configuration_path: &str, format: &str) -> Result<()> {
    info!("Masking secrets in {}", configuration_path);

    let configuration: Configuration = parse_file(Path::new(configuration_path))
        .with_context(|| format!("Failed to parse configuration: {}", configuration_path))?;
    let masked = configuration.masked();

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&masked)?,
        "yaml" => serde_yaml_ng::to_string(&masked)?,
        other => bail!("Unsupported output format: {}", other),
    };
    println!("{}", rendered);
    Ok(())
}
