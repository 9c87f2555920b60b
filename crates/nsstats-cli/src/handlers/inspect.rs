use super::HandlerContext;
use crate::presentation::{InspectReport, print_json};
use crate::types::OutputFormat;
use anyhow::Result;
use nsstats_patterns::{high_frequency_warning, parse_blocks};

pub fn handle(ctx: &HandlerContext, malformed: bool) -> Result<()> {
    let checker = ctx.open_checker(0, String::new())?;

    let blocks = parse_blocks(checker.content());
    let warnings = checker.count_matches(&high_frequency_warning())?;
    let log_file = checker.source().map(|s| s.path.display().to_string());

    let report = InspectReport::new(log_file, &blocks, warnings, malformed);
    tracing::debug!(blocks = report.blocks, "inspected log");

    match ctx.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Plain => print!("{}", report),
    }
    Ok(())
}
