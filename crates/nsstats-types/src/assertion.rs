use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Fail,
}

impl Status {
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// Which threshold an assertion applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    /// `min <= count <= max`
    InRange,
    /// `count >= min`
    AtLeast,
    /// `count == 0`
    Absent,
    /// `count > 0`
    Present,
}

/// Inclusive bounds on the number of matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    pub min: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
}

impl Expectation {
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn none() -> Self {
        Self::between(0, 0)
    }

    pub fn some() -> Self {
        Self::at_least(1)
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

/// Result of checking one pattern against the loaded log.
///
/// `Display` renders the unprefixed report line, e.g.
/// `OK - Pattern 'foo' not found`. The text of each line is consumed by
/// external result aggregators and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionRecord {
    pub status: Status,
    pub kind: AssertionKind,
    pub pattern: String,
    pub observed: usize,
    pub expected: Expectation,
}

impl AssertionRecord {
    /// Evaluate `observed` against `expected` and build the record.
    pub fn evaluate(
        kind: AssertionKind,
        pattern: impl Into<String>,
        observed: usize,
        expected: Expectation,
    ) -> Self {
        let status = if expected.contains(observed) {
            Status::Ok
        } else {
            Status::Fail
        };

        Self {
            status,
            kind,
            pattern: pattern.into(),
            observed,
            expected,
        }
    }

    pub fn passed(&self) -> bool {
        self.status.is_ok()
    }

    /// Report line with an optional label in front.
    pub fn line(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", prefix, self)
        }
    }
}

impl fmt::Display for AssertionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.pattern;
        let n = self.observed;
        let min = self.expected.min;

        match (self.kind, self.status) {
            (AssertionKind::InRange, Status::Ok) => write!(
                f,
                "OK - Number of instances of pattern '{}' is between the required range",
                p
            ),
            (AssertionKind::InRange, Status::Fail) => write!(
                f,
                "FAIL - Found {} instances of pattern '{}' but range is [{}, {}]",
                n,
                p,
                min,
                self.expected.max.unwrap_or(min)
            ),
            (AssertionKind::AtLeast, Status::Ok) => write!(
                f,
                "OK - Number of instances of pattern '{}' is equal or greater than the minimum required",
                p
            ),
            (AssertionKind::AtLeast, Status::Fail) => write!(
                f,
                "FAIL - Found {} instances of pattern '{}' but the minimum is {}",
                n, p, min
            ),
            (AssertionKind::Absent, Status::Ok) => write!(f, "OK - Pattern '{}' not found", p),
            (AssertionKind::Absent, Status::Fail) => {
                write!(f, "FAIL - Pattern '{}' found {} times", p, n)
            }
            (AssertionKind::Present, Status::Ok) => write!(f, "OK - Pattern '{}' found", p),
            (AssertionKind::Present, Status::Fail) => {
                write!(f, "FAIL - Pattern '{}' not found", p)
            }
        }
    }
}

/// Pass/fail totals over a list of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_records(records: &[AssertionRecord]) -> Self {
        let passed = records.iter().filter(|r| r.passed()).count();
        Self {
            total: records.len(),
            passed,
            failed: records.len() - passed,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
