//! File-based logging setup
//!
//! The engine instruments itself with `tracing`; this module is the opt-in
//! subscriber setup for an embedding shell, writing to a rotating log file
//! so a terminal UI keeps the screen to itself.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "raaga";

/// Initialize the logging system.
///
/// Logs are written to `<log_dir>/raaga.YYYY-MM-DD.log` with daily
/// rotation. The log level can be controlled via the `RUST_LOG`
/// environment variable; by default the crate logs at DEBUG and everything
/// else at WARN.
pub fn init_logging(log_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let log_dir = log_dir.as_ref();
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    // Non-blocking writer so logging never stalls the async runtime; the
    // guard must outlive the process.
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("raaga=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI colors in log files
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");

    Ok(())
}
