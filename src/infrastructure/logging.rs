use std::{io, path::Path};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{
    config::{AppConfig, LogFormat, LogRotation, LoggingConfig},
    infrastructure::directories::ResolvedPaths,
};

static GUARD: OnceCell<WorkerGuard> = OnceCell::new();

pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    if GUARD.get().is_some() {
        return Ok(());
    }
    let logging = &config.logging;

    let appender = file_appender(logging, &paths.logs_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let json = logging.format == LogFormat::Json;
    let console_text = (!json).then(|| {
        fmt::layer()
            .with_writer(io::stdout)
            .with_target(true)
            .with_ansi(true)
    });
    let console_json = json.then(|| fmt::layer().json().with_writer(io::stdout));

    // The file keeps plain text regardless of the console format.
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(logging))
        .with(console_text)
        .with(console_json)
        .with(file_layer)
        .try_init()?;
    let _ = GUARD.set(guard);

    tracing::info!(
        logs = %paths.logs_dir.display(),
        prefix = %logging.file_prefix,
        format = ?logging.format,
        "tracing initialized"
    );
    Ok(())
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn file_appender(logging: &LoggingConfig, logs_dir: &Path) -> Result<RollingFileAppender> {
    let rotation = match logging.rotation {
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    };
    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(logging.file_prefix.as_str())
        .filename_suffix("log")
        .build(logs_dir)
        .with_context(|| format!("failed to open log file in {}", logs_dir.display()))
}
