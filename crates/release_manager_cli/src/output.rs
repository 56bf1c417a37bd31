use anyhow::Result;
use colored::*;
use release_manager_core::{
    ConfigDiff, DiffStatus, DynamicValue, ReleaseMatrix, ReleaseMatrixCell, ValidationReport,
};
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => print_json_report(report),
        _ => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.red());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Records checked: {}", report.stats.records_checked);
    println!("  Total errors:    {}", report.errors.len());
    println!("  Total warnings:  {}", report.warnings.len());
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "errors": report.errors,
        "warnings": report.warnings,
        "summary": {
            "error_count": report.errors.len(),
            "warning_count": report.warnings.len(),
            "records_checked": report.stats.records_checked,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_diff(diff: &ConfigDiff, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(diff)?);
        return Ok(());
    }

    println!(
        "\n{} {} vs {}",
        diff.component_ref.bold(),
        diff.environment1.cyan(),
        diff.environment2.cyan()
    );
    println!("{}", "─".repeat(60));

    for difference in &diff.differences {
        let status = match difference.status {
            DiffStatus::Same => difference.status.as_str().green(),
            DiffStatus::Different | DiffStatus::Drift => difference.status.as_str().red(),
            DiffStatus::Expected => difference.status.as_str().blue(),
            DiffStatus::Missing => difference.status.as_str().yellow(),
        };
        println!(
            "  {:<10} {:<24} {} | {}",
            status,
            difference.key,
            side(&difference.value1),
            side(&difference.value2)
        );
    }

    println!("{}", "─".repeat(60));
    println!(
        "  same: {}  different: {}  missing: {}",
        diff.same_count, diff.different_count, diff.missing_count
    );
    Ok(())
}

fn side(value: &Option<DynamicValue>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".dimmed().to_string(),
    }
}

pub fn print_matrix(matrix: &ReleaseMatrix, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(matrix)?);
        return Ok(());
    }

    let header: Vec<String> = matrix
        .environments
        .iter()
        .map(|env| format!("{env:<16}"))
        .collect();
    println!("\n{:<36}{}", "COMPONENT".bold(), header.join("").bold());

    for row in &matrix.rows {
        let cells: Vec<String> = matrix
            .environments
            .iter()
            .map(|env| format!("{:<16}", cell_text(row.cells.get(env))))
            .collect();
        let marker = if row.all_same_version {
            " ".normal()
        } else {
            "*".yellow().bold()
        };
        println!("{marker}{:<35}{}", row.component_ref, cells.join(""));
    }

    println!(
        "\n{} rows; * marks components whose versions differ",
        matrix.rows.len()
    );
    Ok(())
}

fn cell_text(cell: Option<&ReleaseMatrixCell>) -> String {
    let Some(cell) = cell else {
        return "-".to_string();
    };
    let mut text = cell.version.clone().unwrap_or_else(|| "?".to_string());
    if cell.healthy == Some(false) {
        text.push_str(" !");
    }
    if cell.has_drift {
        text.push_str(" ~");
    }
    text
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
