use std::path::Path;

use anyhow::{Context, Result};

/// Sends tracing output to `log_path`, appending. `RUST_LOG` overrides the
/// default `info` filter. Without a path nothing is installed.
pub fn init(log_path: Option<&Path>) -> Result<()> {
    let Some(log_path) = log_path else {
        return Ok(());
    };

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {}", e))?;

    Ok(())
}
