//! Tracing setup for the document workflow.
//!
//! Log lines go to stdout, and to a daily rolling file under the platform
//! data directory when `[logging] file = true`. `RUST_LOG` overrides the
//! default filter.

use std::{fs, io, path::PathBuf, sync::OnceLock};

use anyhow::Context;
use mre_core::config::LoggingConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

const LOG_FILE_PREFIX: &str = "mre-documents.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives; quiets the HTTP stack below our own crates.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        "hyper=warn".to_string(),
        "reqwest=info".to_string(),
        "rustls=warn".to_string(),
        format!("mre_app={level}"),
        format!("mre_infra={level}"),
    ]
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a subscriber is already registered. A log directory that cannot
/// be created only disables file output.
pub fn init_tracing_subscriber(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stdout));

    let file_writer = if config.file {
        match build_file_writer() {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stdout: {err:#}");
                None
            }
        }
    } else {
        None
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn logs_dir() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("mre").join("logs"))
        .context("No local data directory on this platform")
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let logs_dir = logs_dir()?;
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory: {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
