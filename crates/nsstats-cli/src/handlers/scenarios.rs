use super::HandlerContext;
use crate::presentation::{ScenarioListing, print_json};
use crate::scenarios::Scenario;
use crate::types::OutputFormat;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext) -> Result<()> {
    let listings: Vec<ScenarioListing> = Scenario::ALL.into_iter().map(Into::into).collect();

    match ctx.format {
        OutputFormat::Json => print_json(&listings)?,
        OutputFormat::Plain => {
            for listing in &listings {
                println!("{}  {:<6} {}", listing.id, listing.prefix, listing.description);
            }
        }
    }
    Ok(())
}
