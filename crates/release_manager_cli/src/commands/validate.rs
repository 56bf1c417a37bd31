use anyhow::{Context, Result};
use release_manager_core::{ContractDocument, ContractValidator, ValidationContext};
use release_manager_parser::parse_file;
use release_manager_validator::DocumentValidator;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(document_path: &str, strict: bool, format: &str) -> Result<()> {
    info!("Validating document: {}", document_path);
    info!("Strict mode: {}", strict);

    let path = Path::new(document_path);
    let document: ContractDocument = parse_file(path)
        .with_context(|| format!("Failed to parse document: {}", document_path))?;

    if format != "json" {
        output::print_info(&format!("Document kind: {}", document.kind()));
    }

    let context = ValidationContext::new()
        .with_strict(strict)
        .with_metadata("source", document_path);
    let report = DocumentValidator::new().validate(&document, &context);

    output::print_validation_report(&report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
