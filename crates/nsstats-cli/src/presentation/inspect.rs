use nsstats_patterns::{shape_issue, tally};
use nsstats_types::{BlockKind, StatsBlock};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityCount {
    pub kind: BlockKind,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedBlock {
    pub line: usize,
    pub kind: BlockKind,
    pub name: String,
    pub issue: String,
}

/// What the statistics blocks of one log look like
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    pub blocks: usize,
    pub high_frequency_warnings: usize,
    pub entities: Vec<EntityCount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub malformed: Vec<MalformedBlock>,
}

impl InspectReport {
    pub fn new(
        log_file: Option<String>,
        blocks: &[StatsBlock],
        high_frequency_warnings: usize,
        with_malformed: bool,
    ) -> Self {
        let entities = tally(blocks)
            .into_iter()
            .map(|((kind, name), count)| EntityCount { kind, name, count })
            .collect();

        let malformed = if with_malformed {
            blocks
                .iter()
                .filter_map(|block| {
                    shape_issue(block).map(|issue| MalformedBlock {
                        line: block.line,
                        kind: block.kind,
                        name: block.name.clone(),
                        issue,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            log_file,
            blocks: blocks.len(),
            high_frequency_warnings,
            entities,
            malformed,
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.log_file {
            writeln!(f, "Log: {}", path)?;
        }
        writeln!(f, "Statistics blocks: {}", self.blocks)?;
        writeln!(f, "High frequency warnings: {}", self.high_frequency_warnings)?;

        for entity in &self.entities {
            writeln!(f, "  {:<14} {:<24} {}", entity.kind, entity.name, entity.count)?;
        }

        if !self.malformed.is_empty() {
            writeln!(f, "Malformed blocks: {}", self.malformed.len())?;
            for block in &self.malformed {
                writeln!(
                    f,
                    "  line {}: {} {}: {}",
                    block.line, block.kind, block.name, block.issue
                )?;
            }
        }
        Ok(())
    }
}
