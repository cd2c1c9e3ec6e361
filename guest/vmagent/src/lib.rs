//! vmagent boot-time configuration.
//!
//! Resolves the guest agent's runtime posture from the kernel command line
//! before any other subsystem starts. The recognized options are:
//!
//! - `agent.log=<debug|info|warn|error|fatal|panic>`
//! - `agent.devmode`
//! - `agent.trace[=isolated|collated]`
//!
//! Any other token is ignored.
//!
//! # Usage
//!
//! ```rust,no_run
//! let (config, flags) = vmagent::load("/proc/cmdline")?;
//! vmagent::logging::init(&config, &flags);
//! # Ok::<(), vmagent::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{AgentConfig, LogLevel, load};
pub use error::{ConfigError, Result};
pub use runtime::{FaultAction, RuntimeFlags, TraceMode};
