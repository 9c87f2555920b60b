use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity written in front of a statistics block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatsLevel {
    Info,
    Debug,
}

impl fmt::Display for StatsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsLevel::Info => write!(f, "INFO"),
            StatsLevel::Debug => write!(f, "DEBUG"),
        }
    }
}

/// What a statistics block describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Factory,
    Channel,
    DebugChannel,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Factory => f.pad("factory"),
            BlockKind::Channel => f.pad("channel"),
            BlockKind::DebugChannel => f.pad("debug channel"),
        }
    }
}

/// One `key='value'` pair inside a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsField {
    pub key: String,
    pub value: String,
}

/// A parsed `[nsStatistics]` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsBlock {
    pub level: StatsLevel,
    pub kind: BlockKind,
    /// Factory or channel name
    pub name: String,
    pub fields: Vec<StatsField>,
    /// The closing `]` was found after the last field
    pub closed: bool,
    /// 1-based line of the block header
    pub line: usize,
}

impl StatsBlock {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }
}
