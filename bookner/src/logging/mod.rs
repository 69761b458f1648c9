//! Structured logging infrastructure for bookner.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels, and optional file output.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// When logging to a file the returned guard must be kept alive for the
/// lifetime of the program; dropping it stops the background writer.
/// Calling this when a global subscriber is already installed is a no-op.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(None);
    }

    let (writer, guard) = match &config.file {
        Some(path) => {
            let (writer, guard) = create_non_blocking_file(path)?;
            (BoxMakeWriter::new(writer), Some(guard))
        }
        None if config.stdout => (BoxMakeWriter::new(std::io::stdout), None),
        None => (BoxMakeWriter::new(std::io::sink), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(log_level_to_level(config.level))
        .with_level(true)
        .with_target(true)
        .with_line_number(true)
        .with_writer(writer);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Default => builder.try_init(),
    };

    result.map_err(LogError::SubscriberError)?;
    Ok(guard)
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        path.parent().unwrap_or_else(|| Path::new(".")),
        path.file_name().unwrap_or_default(),
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a LogLevel to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}
