use crate::scenarios::Scenario;
use anyhow::Result;
use nsstats_checker::LogChecker;
use nsstats_types::{AssertionRecord, Summary};
use serde::Serialize;

/// Machine-readable outcome of one test case
#[derive(Debug, Serialize)]
pub struct ScenarioReport<'a> {
    pub scenario: u8,
    pub name: Scenario,
    pub prefix: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    pub records: &'a [AssertionRecord],
    pub summary: Summary,
}

impl<'a> ScenarioReport<'a> {
    pub fn new(scenario: Scenario, checker: &'a LogChecker) -> Self {
        Self {
            scenario: scenario.id(),
            name: scenario,
            prefix: checker.prefix(),
            log_file: checker
                .source()
                .map(|s| s.path.display().to_string()),
            records: checker.records(),
            summary: checker.summary(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScenarioListing {
    pub id: u8,
    pub name: Scenario,
    pub prefix: String,
    pub description: &'static str,
}

impl From<Scenario> for ScenarioListing {
    fn from(scenario: Scenario) -> Self {
        Self {
            id: scenario.id(),
            name: scenario,
            prefix: scenario.prefix(),
            description: scenario.description(),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
