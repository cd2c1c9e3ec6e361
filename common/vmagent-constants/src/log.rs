/// Log level names accepted on the kernel cmdline, least severe first.
///
/// `trace` is not accepted here; it is only reachable through `RUST_LOG`.
pub const CMDLINE_LEVELS: [&str; 6] = ["debug", "info", "warn", "error", "fatal", "panic"];

/// Crate target used for the default tracing filter.
pub const LOG_TARGET: &str = "vmagent";
