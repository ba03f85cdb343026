use crate::errors::{AppError, AppResult};
use std::path::Path;
use tracing::Level;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub const LOG_PREFIX: &str = "shyft";

/// Install the global subscriber: warnings and errors go to stderr, every
/// enabled event goes to a daily-rolling file in `diagnostics_dir`.
///
/// `RUST_LOG` wins over `level`.
pub fn enable_logging(diagnostics_dir: &Path, level: &str) -> AppResult<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(diagnostics_dir)
        .map_err(|e| AppError::Config(format!("cannot open log directory: {e}")))?;

    let stderr = std::io::stderr.with_max_level(Level::WARN);

    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_")));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(stderr.and(appender))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Config(format!("logging already initialised: {e}")))?;

    Ok(())
}
