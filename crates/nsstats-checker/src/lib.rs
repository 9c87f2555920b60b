//! Pattern-count assertions over one snapshot of a test log.
//!
//! A [`LogChecker`] is built once per scenario: it resolves the log file of
//! the process under test, reads it whole, and then answers any number of
//! "how often does this pattern occur" questions. Mismatches never abort a
//! scenario; they become FAIL records so later checks still run.

mod checker;
mod error;
mod sink;

pub use checker::{LogChecker, LogSource};
pub use error::{Error, Result};
pub use sink::ReportSink;
