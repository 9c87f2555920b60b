//! The five fixed test cases of the statistics service test suite.
//!
//! Each one encodes what the log must contain for one service configuration.
//! `n` below is the number of statistics rounds observed for the first
//! factory checked; the remaining checks are relative to it so that a round
//! caught half-written at the end of the log still passes.

use nsstats_checker::{LogChecker, Result};
use nsstats_patterns::{
    ChannelFlags, any_channel_header, channel_header, channel_stats_with, debug_channel_header,
    debug_channel_stats, factory_header, factory_stats, high_frequency_warning,
};
use serde::Serialize;
use std::fmt;

const ALARM: &str = "Alarm";
const ARCHIVE: &str = "Archive";
const LOGGING: &str = "Logging";
const DEFAULT_SERVICE: &str = "DefaultNotifyService";

const LOGGING_CHANNEL: &str = "LoggingChannel";
const ARCHIVING_CHANNEL: &str = "ArchivingChannel";
const TEST_CHANNEL_1: &str = "testNsStatsChannel1";
const TEST_CHANNEL_2: &str = "testNsStatsChannel2";

/// Raised for any test case number other than 1-5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownScenario(pub i64);

impl fmt::Display for UnknownScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown test case {}", self.0)
    }
}

impl std::error::Error for UnknownScenario {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// All services at the normal collection interval
    StandardRate,
    /// Only the default service, collecting every few seconds
    DefaultServiceHighRate,
    /// Default service with a single test channel left
    SingleChannelHighRate,
    /// All services at a high rate, reporting the oldest event
    OldestEvent,
    /// All services at a high rate, reporting queue sizes in bytes
    QueueBytes,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::StandardRate,
        Scenario::DefaultServiceHighRate,
        Scenario::SingleChannelHighRate,
        Scenario::OldestEvent,
        Scenario::QueueBytes,
    ];

    pub fn from_id(id: i64) -> std::result::Result<Self, UnknownScenario> {
        match id {
            1 => Ok(Scenario::StandardRate),
            2 => Ok(Scenario::DefaultServiceHighRate),
            3 => Ok(Scenario::SingleChannelHighRate),
            4 => Ok(Scenario::OldestEvent),
            5 => Ok(Scenario::QueueBytes),
            other => Err(UnknownScenario(other)),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Scenario::StandardRate => 1,
            Scenario::DefaultServiceHighRate => 2,
            Scenario::SingleChannelHighRate => 3,
            Scenario::OldestEvent => 4,
            Scenario::QueueBytes => 5,
        }
    }

    /// Label in front of each report line
    pub fn prefix(self) -> String {
        format!("Test{}", self.id())
    }

    /// Every test case checks the log of the first process
    pub fn process_index(self) -> u32 {
        0
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::StandardRate => {
                "No frequency warning; Alarm, Archive, Logging and default service factories reported 1-2 times"
            }
            Scenario::DefaultServiceHighRate => {
                "Frequency warning; only the default service factory, test channels 1 and 2"
            }
            Scenario::SingleChannelHighRate => {
                "Frequency warning; only the default service factory and test channel 2"
            }
            Scenario::OldestEvent => {
                "Frequency warning; all factories, channel statistics include the oldest event"
            }
            Scenario::QueueBytes => {
                "Frequency warning; all factories, channel statistics include queue sizes in bytes"
            }
        }
    }

    /// Run every check of this test case against `checker`
    pub fn run(self, checker: &mut LogChecker) -> Result<()> {
        match self {
            Scenario::StandardRate => standard_rate(checker),
            Scenario::DefaultServiceHighRate => default_service_high_rate(checker),
            Scenario::SingleChannelHighRate => single_channel_high_rate(checker),
            Scenario::OldestEvent => {
                all_services_high_rate(checker, ChannelFlags::with_oldest_event())
            }
            Scenario::QueueBytes => all_services_high_rate(checker, ChannelFlags::with_queue_bytes()),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Expected number of statistics rounds in the log
#[derive(Debug, Clone, Copy)]
struct Rounds {
    min: usize,
    max: usize,
}

impl Rounds {
    const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Lower bound for test channels, which only live for part of the run
    fn half(self) -> usize {
        self.min / 2
    }
}

fn standard_rate(c: &mut LogChecker) -> Result<()> {
    let rounds = Rounds::new(1, 2);

    c.assert_count_absent(&high_frequency_warning())?;

    let n = c.assert_count_in_range(&factory_stats(ALARM), rounds.min, rounds.max)?;
    for factory in [ARCHIVE, LOGGING, DEFAULT_SERVICE] {
        c.assert_count_in_range(&factory_stats(factory), n.saturating_sub(1), n + 1)?;
    }

    check_service_channels(c, n, ChannelFlags::default())?;
    check_test_channel(c, TEST_CHANNEL_1, rounds, ChannelFlags::default())?;
    c.assert_count_absent(&any_channel_header(ALARM))?;

    Ok(())
}

fn default_service_high_rate(c: &mut LogChecker) -> Result<()> {
    let rounds = Rounds::new(3, 15);

    c.assert_count_present(&high_frequency_warning())?;

    c.assert_count_in_range(&factory_stats(DEFAULT_SERVICE), rounds.min, rounds.max)?;
    check_factories_absent(c)?;

    check_channels_absent(c, &[LOGGING_CHANNEL, ARCHIVING_CHANNEL])?;
    check_test_channel(c, TEST_CHANNEL_1, rounds, ChannelFlags::default())?;
    check_test_channel(c, TEST_CHANNEL_2, rounds, ChannelFlags::default())?;
    c.assert_count_absent(&any_channel_header(ALARM))?;

    Ok(())
}

fn single_channel_high_rate(c: &mut LogChecker) -> Result<()> {
    let rounds = Rounds::new(4, 25);

    c.assert_count_present(&high_frequency_warning())?;

    check_factories_absent(c)?;
    c.assert_count_in_range(&factory_stats(DEFAULT_SERVICE), rounds.min, rounds.max)?;

    check_channels_absent(c, &[LOGGING_CHANNEL, ARCHIVING_CHANNEL, TEST_CHANNEL_1])?;
    check_test_channel(c, TEST_CHANNEL_2, rounds, ChannelFlags::default())?;
    c.assert_count_absent(&any_channel_header(ALARM))?;

    Ok(())
}

fn all_services_high_rate(c: &mut LogChecker, flags: ChannelFlags) -> Result<()> {
    let rounds = Rounds::new(4, 25);

    c.assert_count_present(&high_frequency_warning())?;

    let n = c.assert_count_in_range(&factory_stats(ALARM), rounds.min, rounds.max)?;
    for factory in [ARCHIVE, LOGGING, DEFAULT_SERVICE] {
        c.assert_count_in_range(&factory_stats(factory), n.saturating_sub(1), n)?;
    }

    check_service_channels(c, n, flags)?;
    check_test_channel(c, TEST_CHANNEL_1, rounds, flags)?;
    c.assert_count_absent(&any_channel_header(ALARM))?;

    Ok(())
}

/// Logging and archiving channels report once per round, the last round possibly missing
fn check_service_channels(c: &mut LogChecker, n: usize, flags: ChannelFlags) -> Result<()> {
    for channel in [LOGGING_CHANNEL, ARCHIVING_CHANNEL] {
        c.assert_count_in_range(&channel_stats_with(channel, flags), n.saturating_sub(1), n)?;
        c.assert_count_in_range(&debug_channel_stats(channel), n.saturating_sub(1), n)?;
    }
    Ok(())
}

fn check_test_channel(
    c: &mut LogChecker,
    channel: &str,
    rounds: Rounds,
    flags: ChannelFlags,
) -> Result<()> {
    c.assert_count_at_least(&channel_stats_with(channel, flags), rounds.half())?;
    c.assert_count_at_least(&debug_channel_stats(channel), rounds.half())?;
    Ok(())
}

fn check_factories_absent(c: &mut LogChecker) -> Result<()> {
    for factory in [ALARM, ARCHIVE, LOGGING] {
        c.assert_count_absent(&factory_header(factory))?;
    }
    Ok(())
}

fn check_channels_absent(c: &mut LogChecker, channels: &[&str]) -> Result<()> {
    for channel in channels {
        c.assert_count_absent(&channel_header(channel))?;
        c.assert_count_absent(&debug_channel_header(channel))?;
    }
    Ok(())
}
