//! Tracing configuration for clipforward
//!
//! - **Environment filter**: `RUST_LOG` wins; otherwise the configured
//!   `[log] level`, otherwise `debug` in debug builds and `info` in release.
//! - **Writers**: stdout always, plus a non-blocking file writer in the log
//!   directory. File logging failures fall back to stdout only.
//! - **Log bridge**: `log` records from dependencies (tungstenite) are
//!   forwarded into tracing.

use std::path::Path;
use std::{fs, io, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

use super::config::LOG_FILE_NAME;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives.
///
/// `level` replaces the base level when set. Transport crates stay at `info`
/// so frame-level chatter does not drown the forwarding logs.
fn build_filter_directives(is_dev: bool, level: Option<&str>) -> Vec<String> {
    let base = level.unwrap_or(if is_dev { "debug" } else { "info" });
    vec![
        base.to_string(),
        "tungstenite=info".to_string(),
        "tokio_tungstenite=info".to_string(),
        "rustls=warn".to_string(),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Output format: `2026-01-15 10:30:45.123 INFO file.rs:42 target: message`
///
/// ## Errors
///
/// Returns `Err` if a subscriber or `log` logger is already registered.
pub fn init_tracing_subscriber(level: Option<&str>, log_dir: &Path) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development(), level);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer(log_dir) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let subscriber = registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
