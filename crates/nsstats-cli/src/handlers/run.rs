use super::HandlerContext;
use crate::presentation::{ConsoleSink, ScenarioReport, print_json};
use crate::scenarios::Scenario;
use crate::types::OutputFormat;
use anyhow::{Result, bail};

pub fn handle(ctx: &HandlerContext, id: i64) -> Result<()> {
    // Reject the id before touching any file
    let scenario = Scenario::from_id(id)?;

    let mut checker = ctx.open_checker(scenario.process_index(), scenario.prefix())?;
    if ctx.format == OutputFormat::Plain {
        checker = checker.with_sink(Box::new(ConsoleSink::for_stdout()));
    }

    scenario.run(&mut checker)?;

    let summary = checker.summary();
    if summary.all_passed() {
        tracing::info!(scenario = %scenario, total = summary.total, "all checks passed");
    } else {
        tracing::warn!(
            scenario = %scenario,
            total = summary.total,
            failed = summary.failed,
            "some checks failed"
        );
    }

    if ctx.format == OutputFormat::Json {
        print_json(&ScenarioReport::new(scenario, &checker))?;
    }

    if ctx.strict && !summary.all_passed() {
        bail!(
            "{} of {} checks failed in test case {}",
            summary.failed,
            summary.total,
            scenario
        );
    }

    Ok(())
}
