use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "debug";

/// Log to stdout and append the same events, without colour codes, to
/// `log_file`. `RUST_LOG` overrides the default `debug` filter.
pub fn init(log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("cannot open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_line_number(true))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_line_number(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("logging already initialised")?;
    Ok(())
}
