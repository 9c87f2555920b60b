pub mod config;
pub mod error;
pub mod path;
mod user;

pub use config::{CheckerConfig, ConfigOverrides, FileConfig};
pub use error::{Error, Result};
pub use path::{expand_tilde, log_file_path, read_pid};
pub use user::{current_user, user_from_env};
