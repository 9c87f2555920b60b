use crate::path::{DEFAULT_LOG_DIR, DEFAULT_PID_FILE, expand_tilde, log_file_path, read_pid};
use crate::user::{current_user, user_from_env};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PID_FILE: &str = "NSSTATS_PID_FILE";
pub const ENV_LOG_DIR: &str = "NSSTATS_LOG_DIR";
pub const ENV_USER: &str = "NSSTATS_USER";

/// Contents of an `nsstats.toml` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub pid_file: Option<String>,
    #[serde(default)]
    pub log_dir: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl FileConfig {
    /// Looked up in the working directory when `--config` is not given
    pub const DEFAULT_PATH: &'static str = "nsstats.toml";

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_required(path)
    }

    /// Load a config file that the user asked for explicitly
    pub fn load_required(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: FileConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }
}

/// Values given on the command line; they win over everything else
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub pid_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub user: Option<String>,
}

/// Where the checker finds the pid and the log snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    pub pid_file: PathBuf,
    pub log_dir: PathBuf,
    pub user: String,
}

impl CheckerConfig {
    pub fn new(
        pid_file: impl Into<PathBuf>,
        log_dir: impl Into<PathBuf>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            pid_file: pid_file.into(),
            log_dir: log_dir.into(),
            user: user.into(),
        }
    }

    /// Resolve each setting with priority:
    /// 1. Command line override
    /// 2. `NSSTATS_*` environment variable
    /// 3. Config file
    /// 4. Built-in default (`./tmp/pid_test`, `/tmp`, login user)
    pub fn resolve(overrides: &ConfigOverrides, file: &FileConfig) -> Result<Self> {
        Self::resolve_with(overrides, file, |key| std::env::var(key).ok())
    }

    /// Same as [`CheckerConfig::resolve`] with an injected environment lookup
    pub fn resolve_with<F>(overrides: &ConfigOverrides, file: &FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pid_file = match &overrides.pid_file {
            Some(path) => path.clone(),
            None => env(ENV_PID_FILE)
                .or_else(|| file.pid_file.clone())
                .map(|p| expand_tilde(&p))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PID_FILE)),
        };

        let log_dir = match &overrides.log_dir {
            Some(path) => path.clone(),
            None => env(ENV_LOG_DIR)
                .or_else(|| file.log_dir.clone())
                .map(|p| expand_tilde(&p))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        };

        let user = match overrides
            .user
            .clone()
            .or_else(|| env(ENV_USER))
            .or_else(|| file.user.clone())
        {
            Some(user) => user,
            None => match user_from_env(&env) {
                Some(user) => user,
                None => current_user()?,
            },
        };

        Ok(Self {
            pid_file,
            log_dir,
            user,
        })
    }

    /// Read the pid written by the test harness
    pub fn read_pid(&self) -> Result<String> {
        read_pid(&self.pid_file)
    }

    /// Log snapshot path for `pid` and `process_index`
    pub fn log_file(&self, pid: &str, process_index: u32) -> PathBuf {
        log_file_path(&self.log_dir, &self.user, pid, process_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::resolve_with(
            &ConfigOverrides::default(),
            &FileConfig::default(),
            lookup(&[("USER", "almaproc")]),
        )
        .unwrap();

        assert_eq!(config.pid_file, PathBuf::from("./tmp/pid_test"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp"));
        assert_eq!(config.user, "almaproc");
    }

    #[test]
    fn test_priority_override_env_file() {
        let file = FileConfig {
            pid_file: Some("file/pid".to_string()),
            log_dir: Some("file/logs".to_string()),
            user: Some("file-user".to_string()),
        };
        let env = lookup(&[
            (ENV_LOG_DIR, "/env/logs"),
            (ENV_USER, "env-user"),
            ("USER", "login"),
        ]);
        let overrides = ConfigOverrides {
            user: Some("cli-user".to_string()),
            ..Default::default()
        };

        let config = CheckerConfig::resolve_with(&overrides, &file, env).unwrap();

        assert_eq!(config.pid_file, PathBuf::from("file/pid"));
        assert_eq!(config.log_dir, PathBuf::from("/env/logs"));
        assert_eq!(config.user, "cli-user");
    }

    #[test]
    fn test_log_file_uses_user() {
        let config = CheckerConfig::new("./tmp/pid_test", "/tmp", "alice");
        assert_eq!(
            config.log_file("99", 1),
            PathBuf::from("/tmp/alice_test99.1")
        );
    }

    #[test]
    fn test_load_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig::load_from(&dir.path().join("nsstats.toml")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_load_required_missing_config_fails() {
        let dir = TempDir::new().unwrap();
        let err = FileConfig::load_required(&dir.path().join("nsstats.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nsstats.toml");
        std::fs::write(&path, "log_dir = \"/scratch\"\nuser = \"ops\"\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.log_dir.as_deref(), Some("/scratch"));
        assert_eq!(config.user.as_deref(), Some("ops"));
        assert_eq!(config.pid_file, None);
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nsstats.toml");
        std::fs::write(&path, "log_dir = [").unwrap();

        assert!(matches!(FileConfig::load_from(&path), Err(Error::Config(_))));
    }
}
