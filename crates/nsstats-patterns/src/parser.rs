//! Field-level reading of `[nsStatistics]` blocks.
//!
//! The regex builders answer "how many blocks of this exact shape exist";
//! this module answers "which blocks exist and what is wrong with the ones
//! that do not fit", which is what `nsstats inspect` reports.

use nsstats_types::{BlockKind, StatsBlock, StatsField, StatsLevel};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(INFO|DEBUG) \[nsStatistics\]\s+(DEBUG )?STATISTICS OF NOTIFICATION (FACTORY|CHANNEL) (\S+)\s+\[",
    )
    .unwrap()
});

pub const FACTORY_KEYS: [&str; 2] = ["Active event channels", "Num active event channels"];

pub const CHANNEL_KEYS: [&str; 6] = [
    "Num suppliers",
    "Num consumers",
    "Num events in queues",
    "Size of queues [bytes]",
    "Oldest event",
    "Slowest consumers",
];

pub const DEBUG_CHANNEL_KEYS: [&str; 8] = [
    "Num suppliers",
    "Num consumers",
    "Num admin suppliers",
    "Num admin consumers",
    "Supplier names",
    "Consumer names",
    "Supplier admin names",
    "Consumer admin names",
];

/// Parse every statistics block in `text`, in log order
pub fn parse_blocks(text: &str) -> Vec<StatsBlock> {
    let mut blocks = Vec::new();
    let mut line = 1;
    let mut scanned = 0;

    for caps in HEADER.captures_iter(text) {
        let (Some(whole), Some(level), Some(target), Some(name)) =
            (caps.get(0), caps.get(1), caps.get(3), caps.get(4))
        else {
            continue;
        };

        line += text[scanned..whole.start()].matches('\n').count();
        scanned = whole.start();

        let level = match level.as_str() {
            "DEBUG" => StatsLevel::Debug,
            _ => StatsLevel::Info,
        };
        let kind = match (target.as_str(), caps.get(2).is_some()) {
            ("FACTORY", _) => BlockKind::Factory,
            (_, true) => BlockKind::DebugChannel,
            (_, false) => BlockKind::Channel,
        };
        let (fields, closed) = parse_fields(&text[whole.end()..]);

        blocks.push(StatsBlock {
            level,
            kind,
            name: name.as_str().to_string(),
            fields,
            closed,
            line,
        });
    }

    blocks
}

/// Read `key='value'` pairs until the closing `]`.
///
/// Stops at the first thing that is not a field; the flag tells whether the
/// block was closed properly.
fn parse_fields(mut rest: &str) -> (Vec<StatsField>, bool) {
    let mut fields = Vec::new();

    loop {
        rest = rest.trim_start();
        if rest.starts_with(']') {
            return (fields, true);
        }

        let Some(eq) = rest.find("='") else {
            break;
        };
        let key = rest[..eq].trim();
        if key.is_empty() || key.contains('\n') {
            break;
        }

        let after = &rest[eq + 2..];
        let Some(end) = after.find('\'') else {
            break;
        };
        let value = &after[..end];
        if value.contains('\n') {
            break;
        }

        fields.push(StatsField {
            key: key.to_string(),
            value: value.to_string(),
        });
        rest = &after[end + 1..];
    }

    (fields, false)
}

/// Describe why `block` does not have the shape the service writes, if it does not
pub fn shape_issue(block: &StatsBlock) -> Option<String> {
    let keys: Vec<&str> = block.keys().collect();

    let (allowed, range): (&[&str], (usize, usize)) = match block.kind {
        BlockKind::Factory => (&FACTORY_KEYS, (2, 2)),
        BlockKind::Channel => (&CHANNEL_KEYS, (3, 6)),
        BlockKind::DebugChannel => (&DEBUG_CHANNEL_KEYS, (8, 8)),
    };

    if let Some(unknown) = keys.iter().find(|k| !allowed.contains(*k)) {
        return Some(format!("unexpected field '{}'", unknown));
    }

    if keys.len() < range.0 || keys.len() > range.1 {
        return Some(if range.0 == range.1 {
            format!("expected {} fields, found {}", range.0, keys.len())
        } else {
            format!(
                "expected {} to {} fields, found {}",
                range.0,
                range.1,
                keys.len()
            )
        });
    }

    if block.kind == BlockKind::Factory && keys != FACTORY_KEYS {
        return Some("factory fields out of order".to_string());
    }

    if block.kind != BlockKind::Channel && !block.closed {
        return Some("missing closing ']'".to_string());
    }

    None
}

/// Number of blocks per (kind, name), in stable order
pub fn tally(blocks: &[StatsBlock]) -> BTreeMap<(BlockKind, String), usize> {
    let mut counts = BTreeMap::new();
    for block in blocks {
        *counts.entry((block.kind, block.name.clone())).or_insert(0) += 1;
    }
    counts
}
