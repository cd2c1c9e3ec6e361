//! vmagent guest agent.
//!
//! Resolves the agent configuration from the kernel command line and sets up
//! logging before anything else runs. A configuration failure aborts startup.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vmagent_constants::paths::PROC_CMDLINE;

#[derive(Debug, Parser)]
#[command(name = "vmagent")]
#[command(author, version, about, long_about = None)]
struct AgentArgs {
    /// Kernel command line source.
    #[arg(long, default_value = PROC_CMDLINE)]
    cmdline: PathBuf,
}

fn main() -> Result<()> {
    let args = AgentArgs::parse();

    let (config, flags) = vmagent::load(&args.cmdline).with_context(|| {
        format!(
            "failed to resolve agent configuration from {}",
            args.cmdline.display()
        )
    })?;

    vmagent::logging::init(&config, &flags);

    let root = vmagent::logging::root_span(&flags);
    let _entered = root.as_ref().map(tracing::Span::enter);

    tracing::info!(
        "vmagent configured: log_level={}, debug={}, trace={}, crash_on_error={}",
        config.log_level.map_or("default", |level| level.as_str()),
        flags.debug(),
        flags.trace_mode(),
        flags.crash_on_error()
    );

    Ok(())
}
