//! Assertions over `nsstats` output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Report lines with the given status token
pub fn lines_with_status<'a>(stdout: &'a str, status: &str) -> Vec<&'a str> {
    let bare = format!("{status} - ");
    let prefixed = format!(" {status} - ");
    stdout
        .lines()
        .filter(|line| line.starts_with(&bare) || line.contains(&prefixed))
        .collect()
}

/// Assert that every stdout line is a report line labelled `prefix`
pub fn assert_report_lines(stdout: &str, prefix: &str) -> Result<()> {
    let ok = format!("{prefix} OK - ");
    let fail = format!("{prefix} FAIL - ");

    for (i, line) in stdout.lines().enumerate() {
        if !line.starts_with(&ok) && !line.starts_with(&fail) {
            anyhow::bail!("Line {} is not a {} report line: {}", i + 1, prefix, line);
        }
    }
    Ok(())
}

/// Assert that no report line failed
pub fn assert_all_ok(stdout: &str) -> Result<()> {
    let failed = lines_with_status(stdout, "FAIL");
    if !failed.is_empty() {
        anyhow::bail!("Expected no FAIL lines, got {}:\n{}", failed.len(), failed.join("\n"));
    }
    Ok(())
}

/// Assert the `summary` object of a JSON scenario report
pub fn assert_summary(json: &Value, total: u64, failed: u64) -> Result<()> {
    let summary = json
        .get("summary")
        .context("Expected 'summary' object in JSON")?;

    let actual_total = summary["total"].as_u64().context("summary.total missing")?;
    let actual_failed = summary["failed"].as_u64().context("summary.failed missing")?;

    if (actual_total, actual_failed) != (total, failed) {
        anyhow::bail!(
            "Expected {} checks with {} failed, got {} with {} failed",
            total,
            failed,
            actual_total,
            actual_failed
        );
    }
    Ok(())
}
