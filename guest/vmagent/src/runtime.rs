//! Process-wide runtime posture.
//!
//! [`RuntimeFlags`] is created once at startup, filled in while the kernel
//! command line is parsed, and then handed to every subsystem that needs to
//! know whether the agent runs in debug, tracing or crash-on-error mode.
//! `debug`, `tracing` and `crash_on_error` only ever move from `false` to
//! `true`.

use std::fmt;

/// Tracing mode derived from [`RuntimeFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// Tracing is off.
    Disabled,
    /// Each component emits its own traces.
    Isolated,
    /// All traces are aggregated beneath a single root.
    Collated,
}

impl fmt::Display for TraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disabled => "disabled",
            Self::Isolated => "isolated",
            Self::Collated => "collated",
        };
        f.write_str(s)
    }
}

/// What the agent should do after a recoverable fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultAction {
    /// Log the fault and keep running.
    Continue,
    /// Terminate the process.
    Terminate,
}

/// Runtime flags resolved from the kernel command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeFlags {
    debug: bool,
    tracing: bool,
    collated_trace: bool,
    crash_on_error: bool,
}

impl RuntimeFlags {
    /// Creates a new set of flags with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if verbose operation is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns true if trace instrumentation is enabled.
    #[must_use]
    pub const fn tracing(&self) -> bool {
        self.tracing
    }

    /// Returns true if collated tracing was requested.
    ///
    /// Only meaningful when [`tracing`](Self::tracing) is set.
    #[must_use]
    pub const fn collated_trace(&self) -> bool {
        self.collated_trace
    }

    /// Returns true if recoverable faults should terminate the process.
    #[must_use]
    pub const fn crash_on_error(&self) -> bool {
        self.crash_on_error
    }

    /// Returns the effective tracing mode.
    #[must_use]
    pub const fn trace_mode(&self) -> TraceMode {
        match (self.tracing, self.collated_trace) {
            (false, _) => TraceMode::Disabled,
            (true, false) => TraceMode::Isolated,
            (true, true) => TraceMode::Collated,
        }
    }

    /// Enables verbose operation.
    pub fn enable_debug(&mut self) {
        self.debug = true;
    }

    /// Enables tracing. Tracing always implies debug.
    pub fn enable_tracing(&mut self, collated: bool) {
        self.debug = true;
        self.tracing = true;
        self.collated_trace = collated;
    }

    /// Enables development mode: debug plus crash-on-error.
    pub fn enable_devmode(&mut self) {
        self.debug = true;
        self.crash_on_error = true;
    }

    /// Returns how a recoverable fault must be handled.
    #[must_use]
    pub const fn fault_action(&self) -> FaultAction {
        if self.crash_on_error {
            FaultAction::Terminate
        } else {
            FaultAction::Continue
        }
    }

    /// Logs a recoverable fault and returns the action the caller must take.
    ///
    /// ```
    /// use vmagent::{FaultAction, RuntimeFlags};
    ///
    /// let flags = RuntimeFlags::new();
    /// let err = std::io::Error::other("mount failed");
    /// if flags.report_fault("mounting shared directory", &err) == FaultAction::Terminate {
    ///     std::process::exit(1);
    /// }
    /// ```
    pub fn report_fault(&self, context: &str, err: &dyn std::error::Error) -> FaultAction {
        let action = self.fault_action();
        match action {
            FaultAction::Continue => tracing::error!("{}: {}", context, err),
            FaultAction::Terminate => {
                tracing::error!("{}: {} (crash on error enabled, terminating)", context, err);
            }
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags_disabled() {
        let flags = RuntimeFlags::new();
        assert!(!flags.debug());
        assert!(!flags.tracing());
        assert!(!flags.collated_trace());
        assert!(!flags.crash_on_error());
        assert_eq!(flags.trace_mode(), TraceMode::Disabled);
        assert_eq!(flags.fault_action(), FaultAction::Continue);
    }

    #[test]
    fn test_enable_tracing() {
        for collated in [false, true] {
            let mut flags = RuntimeFlags::new();
            flags.enable_tracing(collated);

            assert!(flags.debug(), "collated={collated}");
            assert!(flags.tracing(), "collated={collated}");
            assert_eq!(flags.collated_trace(), collated);
            assert!(!flags.crash_on_error());
        }
    }

    #[test]
    fn test_trace_mode() {
        let mut flags = RuntimeFlags::new();
        flags.enable_tracing(false);
        assert_eq!(flags.trace_mode(), TraceMode::Isolated);

        flags.enable_tracing(true);
        assert_eq!(flags.trace_mode(), TraceMode::Collated);
        assert_eq!(flags.trace_mode().to_string(), "collated");
    }

    #[test]
    fn test_enable_devmode() {
        let mut flags = RuntimeFlags::new();
        flags.enable_devmode();

        assert!(flags.debug());
        assert!(flags.crash_on_error());
        assert!(!flags.tracing());
        assert_eq!(flags.fault_action(), FaultAction::Terminate);
    }

    #[test]
    fn test_debug_does_not_imply_tracing() {
        let mut flags = RuntimeFlags::new();
        flags.enable_debug();

        assert!(flags.debug());
        assert!(!flags.tracing());
        assert!(!flags.crash_on_error());
    }

    #[test]
    fn test_report_fault() {
        let err = std::io::Error::other("boom");

        let flags = RuntimeFlags::new();
        assert_eq!(flags.report_fault("mount", &err), FaultAction::Continue);

        let mut flags = RuntimeFlags::new();
        flags.enable_devmode();
        assert_eq!(flags.report_fault("mount", &err), FaultAction::Terminate);
    }
}
