//! Agent configuration from the kernel command line.
//!
//! The command line is split on whitespace and each token is matched in two
//! phases. First the key is checked against the option families the agent
//! owns (`agent.log`, `agent.devmode`, `agent.trace`). Tokens outside those
//! families are ignored without error, since the command line also carries
//! kernel options and options for other guest components. Only a recognized
//! key enters value validation, and an invalid value there is a hard error.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use vmagent_constants::cmdline::{
    DEVMODE_FLAG, LOG_LEVEL_KEY, TRACE_MODE_KEY, TRACE_VALUE_COLLATED, TRACE_VALUE_ISOLATED,
    VALUE_SEPARATOR,
};
use vmagent_constants::log::CMDLINE_LEVELS;

use crate::error::{ConfigError, Result};
use crate::runtime::RuntimeFlags;

/// Agent log severity, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl LogLevel {
    /// Every level, least severe first.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Panic,
    ];

    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Maps the level onto a `tracing` filter.
    ///
    /// `tracing` has no levels above error, so fatal and panic collapse to it.
    #[must_use]
    pub const fn as_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;

        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error | Self::Fatal | Self::Panic => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a level as accepted by `agent.log=<level>`.
///
/// Matching is exact and case-sensitive. `trace` is rejected.
impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| CMDLINE_LEVELS.contains(&s) && level.as_str() == s)
            .ok_or_else(|| ConfigError::invalid_value(LOG_LEVEL_KEY, s))
    }
}

/// A token whose key belongs to an agent option family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmdlineOption<'a> {
    LogLevel(Option<&'a str>),
    DevMode,
    Trace(Option<&'a str>),
}

impl<'a> CmdlineOption<'a> {
    /// Recognizes the option family of `token`, without looking at its value.
    fn recognize(token: &'a str) -> Option<Self> {
        let (key, value) = match token.split_once(VALUE_SEPARATOR) {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };

        match key {
            LOG_LEVEL_KEY => Some(Self::LogLevel(value)),
            DEVMODE_FLAG if value.is_none() => Some(Self::DevMode),
            TRACE_MODE_KEY => Some(Self::Trace(value)),
            _ => None,
        }
    }
}

/// Resolved agent configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentConfig {
    /// Log level requested on the command line, if any.
    pub log_level: Option<LogLevel>,
}

impl AgentConfig {
    /// Creates a configuration with an explicit log level.
    #[must_use]
    pub fn new(log_level: LogLevel) -> Self {
        Self {
            log_level: Some(log_level),
        }
    }

    /// Reads the kernel command line at `path` and applies every option in it.
    ///
    /// Bytes that are not valid UTF-8 are replaced before tokenizing. Agent
    /// options are ASCII, so this only affects tokens the agent ignores.
    ///
    /// State is applied to `self` and `flags` as tokens are consumed, so on
    /// error both hold whatever was applied before the failing token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPath`] for an empty path,
    /// [`ConfigError::Read`] if the file cannot be read, and any error from
    /// [`parse_cmdline`](Self::parse_cmdline).
    pub fn get_config(&mut self, path: impl AsRef<Path>, flags: &mut RuntimeFlags) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath);
        }

        let content = std::fs::read(path).map_err(|e| ConfigError::read(path, e))?;
        tracing::debug!("Read kernel command line from {}", path.display());

        self.parse_cmdline(&String::from_utf8_lossy(&content), flags)
    }

    /// Applies every whitespace-separated option in `content`.
    ///
    /// Stops at the first invalid option.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`parse_cmdline_option`](Self::parse_cmdline_option).
    pub fn parse_cmdline(&mut self, content: &str, flags: &mut RuntimeFlags) -> Result<()> {
        content
            .split_whitespace()
            .try_for_each(|token| self.parse_cmdline_option(token, flags))
    }

    /// Applies a single command-line token.
    ///
    /// Tokens that do not belong to an agent option family are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptionValue`] if `agent.log` is given a
    /// value that is not a valid level.
    pub fn parse_cmdline_option(&mut self, option: &str, flags: &mut RuntimeFlags) -> Result<()> {
        let Some(recognized) = CmdlineOption::recognize(option) else {
            tracing::trace!("Ignoring cmdline option {:?}", option);
            return Ok(());
        };

        match recognized {
            CmdlineOption::LogLevel(value) => {
                let level: LogLevel = value.unwrap_or_default().parse()?;
                if level == LogLevel::Debug {
                    flags.enable_debug();
                }
                self.log_level = Some(level);
                tracing::debug!("Log level set to {}", level);
            }
            CmdlineOption::DevMode => {
                flags.enable_devmode();
                tracing::debug!("Development mode enabled");
            }
            CmdlineOption::Trace(None | Some(TRACE_VALUE_ISOLATED)) => {
                flags.enable_tracing(false);
                tracing::debug!("Isolated tracing enabled");
            }
            CmdlineOption::Trace(Some(TRACE_VALUE_COLLATED)) => {
                flags.enable_tracing(true);
                tracing::debug!("Collated tracing enabled");
            }
            CmdlineOption::Trace(Some(_)) => {
                tracing::trace!("Ignoring cmdline option {:?}", option);
            }
        }

        Ok(())
    }
}

/// Loads the configuration from the kernel command line at `path`.
///
/// Starts from fresh state, so nothing is exposed to the caller on failure.
///
/// # Errors
///
/// See [`AgentConfig::get_config`].
pub fn load(path: impl AsRef<Path>) -> Result<(AgentConfig, RuntimeFlags)> {
    let mut config = AgentConfig::default();
    let mut flags = RuntimeFlags::new();
    config.get_config(path, &mut flags)?;
    Ok((config, flags))
}
