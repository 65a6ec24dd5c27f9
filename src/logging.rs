//! Tracing subscriber setup for the driver binary.

use anyhow::{anyhow, Result};
use tracing_subscriber::{filter::EnvFilter, fmt};

/// Install a stderr subscriber at `level`; `RUST_LOG` takes precedence
pub fn init(level: &str) -> Result<()> {
    let directive = level
        .parse()
        .map_err(|e| anyhow!("invalid log level '{}': {}", level, e))?;

    let filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
