//! Loads agent configuration from real command-line files.

use std::io::Write;

use tempfile::NamedTempFile;
use vmagent::{AgentConfig, FaultAction, LogLevel, RuntimeFlags, TraceMode};

fn cmdline_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_realistic_cmdline() {
    let file = cmdline_file(
        "console=hvc0 rdinit=/init quiet agent.log=debug agent.trace=collated \
         systemd.unit=agent.target\n",
    );

    let (config, flags) = vmagent::load(file.path()).unwrap();

    assert_eq!(config, AgentConfig::new(LogLevel::Debug));
    assert!(flags.debug());
    assert_eq!(flags.trace_mode(), TraceMode::Collated);
    assert!(!flags.crash_on_error());
    assert_eq!(flags.fault_action(), FaultAction::Continue);
}

#[test]
fn test_load_devmode() {
    let file = cmdline_file("root=/dev/vda agent.devmode");

    let (config, flags) = vmagent::load(file.path()).unwrap();

    assert_eq!(config.log_level, None);
    assert!(flags.debug());
    assert!(flags.crash_on_error());
    assert_eq!(flags.trace_mode(), TraceMode::Disabled);
    assert_eq!(flags.fault_action(), FaultAction::Terminate);
}

#[test]
fn test_load_only_foreign_options() {
    let file = cmdline_file("console=ttyS0 agent.lgo=debug devmode =agent.trace agent.trace=");

    let (config, flags) = vmagent::load(file.path()).unwrap();

    assert_eq!(config, AgentConfig::default());
    assert_eq!(flags, RuntimeFlags::new());
}

#[test]
fn test_load_invalid_level_fails() {
    let file = cmdline_file("agent.trace agent.log=debgu");

    let err = vmagent::load(file.path()).unwrap_err();
    assert!(err.is_invalid_log_level());
}

#[test]
fn test_load_error_kinds_distinct() {
    let dir = tempfile::tempdir().unwrap();

    let missing = vmagent::load(dir.path().join("missing")).unwrap_err();
    assert!(missing.is_read());
    assert!(!missing.is_empty_path());

    let empty = vmagent::load("").unwrap_err();
    assert!(empty.is_empty_path());
    assert!(!empty.is_read());
}

#[test]
fn test_get_config_keeps_earlier_options_on_error() {
    let file = cmdline_file("agent.devmode agent.log=nope agent.trace");

    let mut config = AgentConfig::default();
    let mut flags = RuntimeFlags::new();
    let err = config.get_config(file.path(), &mut flags).unwrap_err();

    assert!(err.is_invalid_option_value());
    assert!(flags.crash_on_error());
    assert!(!flags.tracing());
}
