//! Isolated environment for running the `nsstats` binary.
//!
//! The temp root plays the working directory of the test harness: it holds
//! `tmp/pid_test`, and log snapshots go to `<root>/logs`.

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::SampleLog;

pub const DEFAULT_PID: &str = "4242";
pub const DEFAULT_USER: &str = "tester";

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use nsstats_testing::{SampleLog, TestWorld};
///
/// let world = TestWorld::new().with_sample(0, &SampleLog::passing(1));
///
/// let result = world.run(&["1"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    log_dir: PathBuf,
    pid: String,
    user: String,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create an environment with a pid file and an empty log directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log_dir = temp_dir.path().join("logs");

        std::fs::create_dir_all(temp_dir.path().join("tmp")).expect("Failed to create tmp dir");
        std::fs::create_dir_all(&log_dir).expect("Failed to create log dir");

        let world = Self {
            temp_dir,
            log_dir,
            pid: DEFAULT_PID.to_string(),
            user: DEFAULT_USER.to_string(),
            env_vars: HashMap::new(),
        };
        world.write_pid_file(&format!("{}\n", DEFAULT_PID));
        world
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn pid_file(&self) -> PathBuf {
        self.root().join("tmp").join("pid_test")
    }

    /// Path the CLI derives for process `index`
    pub fn log_path(&self, index: u32) -> PathBuf {
        self.log_dir
            .join(format!("{}_test{}.{}", self.user, self.pid, index))
    }

    /// Write the log snapshot of process `index`.
    pub fn with_log(self, index: u32, content: &str) -> Self {
        std::fs::write(self.log_path(index), content).expect("Failed to write log");
        self
    }

    pub fn with_sample(self, index: u32, log: &SampleLog) -> Self {
        let content = log.build();
        self.with_log(index, &content)
    }

    /// Write `nsstats.toml` in the working directory.
    pub fn with_config_file(self, content: &str) -> Self {
        std::fs::write(self.root().join("nsstats.toml"), content).expect("Failed to write config");
        self
    }

    pub fn without_pid_file(self) -> Self {
        std::fs::remove_file(self.pid_file()).expect("Failed to remove pid file");
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    fn write_pid_file(&self, content: &str) {
        std::fs::write(self.pid_file(), content).expect("Failed to write pid file");
    }

    fn configure_command(&self, cmd: &mut Command) {
        cmd.current_dir(self.root());

        // Keep the caller's environment out of the result
        cmd.env_remove("RUST_LOG");
        cmd.env_remove("NSSTATS_PID_FILE");
        cmd.env("NSSTATS_LOG_DIR", &self.log_dir);
        cmd.env("NSSTATS_USER", &self.user);

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
    }

    /// Run `nsstats` with `args` inside the environment.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("nsstats")
            .map_err(|e| anyhow::anyhow!("Failed to find nsstats binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
