use std::fmt;
use std::path::PathBuf;

/// Result type for nsstats-checker operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Pid file or configuration could not be resolved
    Setup(nsstats_core::Error),

    /// The log snapshot could not be read
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A pattern handed to the checker is not a valid regex
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Setup(err) => write!(f, "{}", err),
            Error::LogFile { path, source } => write!(
                f,
                "Unexpected error reading file {}: {}",
                path.display(),
                source
            ),
            Error::Pattern { pattern, source } => {
                write!(f, "Invalid pattern '{}': {}", pattern, source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Setup(err) => Some(err),
            Error::LogFile { source, .. } => Some(source),
            Error::Pattern { source, .. } => Some(source),
        }
    }
}

impl From<nsstats_core::Error> for Error {
    fn from(err: nsstats_core::Error) -> Self {
        Error::Setup(err)
    }
}
