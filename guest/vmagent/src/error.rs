//! Error types for agent configuration resolution.

use std::path::PathBuf;

use thiserror::Error;
use vmagent_constants::cmdline::LOG_LEVEL_KEY;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while resolving the agent configuration.
///
/// Every variant is fatal for startup. Unrecognized cmdline tokens never
/// produce an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No command-line source was provided.
    #[error("kernel command line path is empty")]
    EmptyPath,

    /// The command-line source is missing or unreadable.
    #[error("failed to read kernel command line from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recognized option carried a value outside its accepted set.
    #[error("invalid value {value:?} for option {option}")]
    InvalidOptionValue { option: &'static str, value: String },
}

impl ConfigError {
    /// Creates a new read error for `path`.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new invalid value error for a recognized option.
    #[must_use]
    pub fn invalid_value(option: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOptionValue {
            option,
            value: value.into(),
        }
    }

    /// Returns true if no source path was given.
    #[must_use]
    pub const fn is_empty_path(&self) -> bool {
        matches!(self, Self::EmptyPath)
    }

    /// Returns true if the source could not be read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// Returns true if a recognized option had an invalid value.
    #[must_use]
    pub const fn is_invalid_option_value(&self) -> bool {
        matches!(self, Self::InvalidOptionValue { .. })
    }

    /// Returns true if `agent.log` had an invalid level.
    #[must_use]
    pub fn is_invalid_log_level(&self) -> bool {
        matches!(self, Self::InvalidOptionValue { option, .. } if *option == LOG_LEVEL_KEY)
    }
}
