//! Logging bootstrap driven by the resolved configuration.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vmagent_constants::log::LOG_TARGET;

use crate::config::AgentConfig;
use crate::runtime::{RuntimeFlags, TraceMode};

/// Returns the default verbosity for the agent.
///
/// An explicit `agent.log` level wins, then the debug flag, then info.
#[must_use]
pub fn default_level(config: &AgentConfig, flags: &RuntimeFlags) -> LevelFilter {
    match config.log_level {
        Some(level) => level.as_filter(),
        None if flags.debug() => LevelFilter::DEBUG,
        None => LevelFilter::INFO,
    }
}

/// Returns the filter directive used when `RUST_LOG` is not set.
#[must_use]
pub fn filter_directive(config: &AgentConfig, flags: &RuntimeFlags) -> String {
    let level = default_level(config, flags).to_string().to_lowercase();
    format!("{LOG_TARGET}={level}")
}

/// Installs the global subscriber.
///
/// Span open/close events are only recorded while tracing is enabled.
pub fn init(config: &AgentConfig, flags: &RuntimeFlags) {
    let span_events = if flags.tracing() {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter_directive(config, flags).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_span_events(span_events))
        .init();
}

/// Returns the process-wide root span for collated tracing.
///
/// The caller keeps it entered for the lifetime of the agent so every later
/// span nests beneath it. Isolated and disabled modes have no root.
#[must_use]
pub fn root_span(flags: &RuntimeFlags) -> Option<tracing::Span> {
    match flags.trace_mode() {
        TraceMode::Collated => Some(tracing::info_span!("vmagent", trace_mode = "collated")),
        TraceMode::Isolated | TraceMode::Disabled => None,
    }
}
