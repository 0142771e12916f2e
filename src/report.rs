//
// report.rs
// Update-Golden-AMI-rs
//
// Renders the run summary for the terminal and as JSON for scripting.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    let verb = if summary.dry_run { "would be tagged" } else { "tagged" };
    let failed = summary.failed_regions().count();
    println!(
        "Summary: {} image(s) {} with '{}' = '{}' across {} region(s), {} failed",
        summary.affected_images(),
        verb,
        summary.tag.key,
        summary.tag.value,
        summary.regions.len(),
        failed
    );
    for line in failure_lines(summary) {
        eprintln!("{}", line);
    }
}

/// One line per failed region; errors already naming their region are not prefixed twice.
pub fn failure_lines(summary: &RunSummary) -> Vec<String> {
    summary
        .failed_regions()
        .filter_map(|report| {
            let err = report.error.as_ref()?;
            Some(match err.region() {
                Some(_) => format!("  {}", err),
                None => format!("  {}: {}", report.region, err),
            })
        })
        .collect()
}

pub fn to_json_string(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("Failed to serialize run summary")
}

pub fn write_json(summary: &RunSummary, path: &Path) -> Result<()> {
    let json_string = to_json_string(summary)?;
    std::fs::write(path, json_string).context("Failed to write run summary to file")?;
    println!("Summary saved to {:?}", path);
    Ok(())
}
