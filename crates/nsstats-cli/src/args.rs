use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use nsstats_core::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nsstats")]
#[command(about = "Check notification service statistics in a test log", long_about = None)]
#[command(version)]
#[command(
    after_help = "Setup errors (unreadable pid file or log) are reported on stderr only and \
                  exit with status 1; stdout then carries no line for them."
)]
pub struct Cli {
    /// Test case to run (1-5)
    #[arg(value_name = "TEST_CASE", allow_negative_numbers = true)]
    pub scenario: Option<i64>,

    #[command(flatten)]
    pub location: LocationArgs,

    /// TOML file with pid_file, log_dir and user [default: ./nsstats.toml if present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Exit with status 1 when any assertion fails
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one test case against the log of the process under test
    Run {
        #[arg(value_name = "TEST_CASE", allow_negative_numbers = true)]
        scenario: i64,
    },

    /// List the available test cases
    Scenarios,

    /// Summarise the statistics blocks found in the log
    Inspect {
        /// Also list every block that does not have the expected fields
        #[arg(long)]
        malformed: bool,
    },
}

/// Where to find the pid file and the log snapshot
#[derive(Debug, Clone, Default, Args)]
pub struct LocationArgs {
    /// Pid file written by the test harness [default: ./tmp/pid_test]
    #[arg(long, global = true)]
    pub pid_file: Option<PathBuf>,

    /// Directory holding <user>_test<pid>.<index> [default: /tmp]
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// User name used in the log file name [default: login user]
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Process index used in the log file name [default: 0]
    #[arg(long, global = true)]
    pub proc_index: Option<u32>,

    /// Label in front of every report line [default: Test<N>]
    #[arg(long, global = true)]
    pub prefix: Option<String>,
}

impl LocationArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            pid_file: self.pid_file.clone(),
            log_dir: self.log_dir.clone(),
            user: self.user.clone(),
        }
    }
}
