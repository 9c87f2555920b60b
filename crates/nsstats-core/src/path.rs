use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Pid file written by the test harness, relative to the working directory
pub const DEFAULT_PID_FILE: &str = "./tmp/pid_test";

/// Directory the notification service writes its test logs to
pub const DEFAULT_LOG_DIR: &str = "/tmp";

/// Read the pid of the process under test.
///
/// Surrounding whitespace is stripped, so a pid file written with
/// `echo $! > tmp/pid_test` works as well as one without a newline.
pub fn read_pid(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::PidFile {
        path: path.to_path_buf(),
        source,
    })?;

    let pid = content.trim();
    if pid.is_empty() {
        return Err(Error::EmptyPid(path.to_path_buf()));
    }

    tracing::debug!(pid, path = %path.display(), "read pid file");
    Ok(pid.to_string())
}

/// Path of the log snapshot for one process: `<log_dir>/<user>_test<pid>.<index>`
pub fn log_file_path(log_dir: &Path, user: &str, pid: &str, process_index: u32) -> PathBuf {
    log_dir.join(format!("{}_test{}.{}", user, pid, process_index))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
