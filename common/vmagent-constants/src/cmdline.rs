/// Kernel cmdline key selecting the agent log level (`agent.log=<level>`).
pub const LOG_LEVEL_KEY: &str = "agent.log";

/// Kernel cmdline flag enabling development mode.
pub const DEVMODE_FLAG: &str = "agent.devmode";

/// Kernel cmdline key enabling tracing (`agent.trace[=isolated|collated]`).
pub const TRACE_MODE_KEY: &str = "agent.trace";

/// Trace mode value: each component emits its own traces.
pub const TRACE_VALUE_ISOLATED: &str = "isolated";

/// Trace mode value: traces are aggregated under one root.
pub const TRACE_VALUE_COLLATED: &str = "collated";

/// Separator between an option key and its value.
pub const VALUE_SEPARATOR: char = '=';
