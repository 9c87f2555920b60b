//! Shared data types for the nsstats workspace.
//!
//! - `assertion`: records produced by every check a scenario performs
//! - `stats`: statistics blocks as written by the notification service

pub mod assertion;
pub mod stats;

pub use assertion::*;
pub use stats::*;
