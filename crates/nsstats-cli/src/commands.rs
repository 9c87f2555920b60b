use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use anyhow::{Result, bail};

pub fn run(cli: Cli) -> Result<()> {
    let ctx = HandlerContext::new(&cli);

    match (cli.command, cli.scenario) {
        (Some(Commands::Run { scenario }), _) | (None, Some(scenario)) => {
            handlers::run::handle(&ctx, scenario)
        }
        (Some(Commands::Scenarios), _) => handlers::scenarios::handle(&ctx),
        (Some(Commands::Inspect { malformed }), _) => handlers::inspect::handle(&ctx, malformed),
        (None, None) => bail!("missing test case number (1-5); run `nsstats scenarios` to list them"),
    }
}
