use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow};
use tracing::Span;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{self, RollingFileAppender},
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

use crate::config::{LogFileConfig, LogRotation, LoggingConfig};

const LOG_FILE_NAME: &str = "allotment.log";

/// Flushes the file sink on drop and tags this run's events.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    run_id: String,
}

impl LoggingGuard {
    /// Span under which one document is evaluated. Its `run_id` lets lines
    /// from a shared log file be grouped by invocation.
    pub fn evaluation_span(&self, document: &Path) -> Span {
        tracing::info_span!(
            target: "feasibility",
            "evaluation",
            run_id = %self.run_id,
            document = %document.display()
        )
    }
}

pub fn init_tracing(logging_config: &LoggingConfig) -> Result<LoggingGuard> {
    if logging_config.filter.trim().is_empty() {
        return Err(anyhow!("logging.filter cannot be empty"));
    }
    let env_filter = build_env_filter(&logging_config.filter)?;

    let (file_layer, file_guard) = match &logging_config.file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(file)?);
            let layer = fmt::layer()
                .json()
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_current_span(true)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(env_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = logging_config.stderr_warn_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    let run_id = Uuid::now_v7().to_string();
    tracing::info!(
        target: "logging",
        run_id = %run_id,
        file = ?logging_config.file.as_ref().map(|file| file.dir.join(LOG_FILE_NAME)),
        filter = %logging_config.filter,
        "logging_initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
        run_id,
    })
}

fn build_env_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter)
        .with_context(|| format!("failed to parse logging.filter '{}'", filter))
}

fn open_log_file(file: &LogFileConfig) -> Result<RollingFileAppender> {
    fs::create_dir_all(&file.dir)
        .with_context(|| format!("failed to create logging directory {}", file.dir.display()))?;

    Ok(match file.rotation {
        LogRotation::Never => rolling::never(&file.dir, LOG_FILE_NAME),
        LogRotation::Daily => rolling::daily(&file.dir, LOG_FILE_NAME),
        LogRotation::Hourly => rolling::hourly(&file.dir, LOG_FILE_NAME),
    })
}
