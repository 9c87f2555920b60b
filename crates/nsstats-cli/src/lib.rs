// NOTE: Output contract
//
// stdout carries nothing but report lines (`[<prefix> ]OK|FAIL - ...`) or a
// single JSON document; an external aggregator diffs it against reference
// output. Diagnostics go through `tracing` to stderr, including setup
// failures: an unreadable pid file or log produces no labelled
// `<prefix> Unexpected error ...` line on stdout, only `Error: ...` on stderr
// and exit status 1.
//
// A mismatch is a FAIL line, never an error. Only unreadable inputs, bad
// patterns and unknown scenario ids end the run early.

mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod scenarios;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
pub use scenarios::{Scenario, UnknownScenario};
