use crate::args::{Cli, LocationArgs};
use crate::types::OutputFormat;
use anyhow::Result;
use nsstats_checker::LogChecker;
use nsstats_core::{CheckerConfig, FileConfig};
use std::path::{Path, PathBuf};

/// Options shared by every handler
pub struct HandlerContext {
    pub format: OutputFormat,
    pub strict: bool,
    pub location: LocationArgs,
    config_path: Option<PathBuf>,
}

impl HandlerContext {
    pub fn new(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            strict: cli.strict,
            location: cli.location.clone(),
            config_path: cli.config.clone(),
        }
    }

    /// An explicit `--config` must exist; the default file is optional
    pub fn checker_config(&self) -> Result<CheckerConfig> {
        let file = match &self.config_path {
            Some(path) => FileConfig::load_required(path)?,
            None => FileConfig::load_from(Path::new(FileConfig::DEFAULT_PATH))?,
        };
        let config = CheckerConfig::resolve(&self.location.overrides(), &file)?;

        tracing::debug!(
            pid_file = %config.pid_file.display(),
            log_dir = %config.log_dir.display(),
            user = %config.user,
            "resolved checker config"
        );
        Ok(config)
    }

    pub fn open_checker(&self, default_index: u32, default_prefix: String) -> Result<LogChecker> {
        let config = self.checker_config()?;
        let process_index = self.location.proc_index.unwrap_or(default_index);
        let prefix = self.location.prefix.clone().unwrap_or(default_prefix);
        Ok(LogChecker::open(&config, process_index, prefix)?)
    }
}
