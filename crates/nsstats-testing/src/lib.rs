//! Testing infrastructure for nsstats integration tests.
//!
//! - `TestWorld`: isolated directory with a pid file and log snapshots
//! - `fixtures`: builder for statistics logs in the service's format
//! - `assertions`: checks over report lines and JSON output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::{ChannelExtra, SampleLog};
pub use world::{CliResult, TestWorld};
