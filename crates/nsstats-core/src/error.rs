use std::fmt;
use std::path::PathBuf;

/// Result type for nsstats-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving where the test log lives
#[derive(Debug)]
pub enum Error {
    /// The pid file written by the test harness could not be read
    PidFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The pid file was readable but held no pid
    EmptyPid(PathBuf),

    /// The user running the test could not be determined
    UnknownUser,

    /// Configuration file is missing or malformed
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PidFile { path, source } => write!(
                f,
                "Unexpected error reading pid file {}: {}",
                path.display(),
                source
            ),
            Error::EmptyPid(path) => write!(f, "Pid file {} is empty", path.display()),
            Error::UnknownUser => write!(
                f,
                "Could not determine user name: LOGNAME, USER, LNAME and USERNAME are unset"
            ),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PidFile { source, .. } => Some(source),
            Error::EmptyPid(_) | Error::UnknownUser | Error::Config(_) => None,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
