use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to a file; the terminal belongs to the TUI.
pub fn init_file_logging(level: &str, path: &Path) -> Result<()> {
    let log_file = std::sync::Arc::new(
        std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?,
    );
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter_for(level))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!(path=%path.display(), "logging initialized");
    Ok(())
}

/// Log to stderr for the line-oriented CLI.
pub fn init_stderr_logging(level: &str) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter_for(level))
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    info!("logging initialized");
    Ok(())
}
