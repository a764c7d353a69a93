use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Keeps the background log writer alive; drop it last.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Path of the log file for `player` under `logging.directory`.
pub fn log_path(logging: &LoggingConfig, player: &str) -> PathBuf {
    logging.directory.join(format!("{player}.log"))
}

pub fn init_logging(logging: &LoggingConfig, player: &str) -> Result<Option<LoggingGuard>> {
    if !logging.enabled {
        return Ok(None);
    }

    fs::create_dir_all(&logging.directory).with_context(|| {
        format!(
            "creating log directory at {}",
            logging.directory.display()
        )
    })?;

    let log_path = log_path(logging, player);
    let file = File::create(&log_path)
        .with_context(|| format!("creating log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false)
        .with_writer(writer);

    // A global subscriber may already be installed, e.g. in tests.
    let _ = match logging.format {
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.json().with_current_span(false).finish())
        }
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
    };

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path,
    }))
}
