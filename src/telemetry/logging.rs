//! Logging configuration and initialization.
//!
//! Supports JSON, pretty-printed, message-only and nested OWASP JSON formats
//! with an optional output file and optional OpenTelemetry log export.

use std::path::PathBuf;

use opentelemetry_sdk::logs::SdkLoggerProvider;
use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::format::{MessageOnly, NestedJson};
use crate::export::tracing_bridge;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// `tracing-subscriber` JSON lines.
    Json,
    /// Human-readable pretty printing (for development).
    Pretty,
    /// The message only; OWASP events appear as their JSON record.
    #[default]
    Plain,
    /// One JSON object per event with the OWASP record under `owasp_event`.
    NestedJson,
}

impl LogFormat {
    /// Parse a format name as used in configuration.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            "plain" | "text" => Some(Self::Plain),
            "nested_json" | "nested-json" | "nested" => Some(Self::NestedJson),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Plain => "plain",
            Self::NestedJson => "nested_json",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Log level filter (e.g., "info", "debug", "owasp=warn").
    pub level: String,
    /// Optional file path for log output. If None, logs to stderr.
    pub output_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Plain,
            level: "info".to_string(),
            output_path: None,
        }
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
    #[error("Failed to open log file: {0}")]
    FileOpen(String),
    #[error("Subscriber already initialized")]
    AlreadyInitialized,
}

/// Initialize the global tracing subscriber.
///
/// When `provider` is given, every event that passes the filter is also
/// bridged into it as an OpenTelemetry log record. Events from the
/// OpenTelemetry crates themselves are not bridged. This should be called
/// once at application startup.
pub fn init_logging(
    config: &LogConfig,
    provider: Option<&SdkLoggerProvider>,
) -> Result<(), LogError> {
    let filter =
        EnvFilter::try_new(&config.level).map_err(|e| LogError::InvalidFilter(e.to_string()))?;

    let bridge = provider.map(|provider| {
        tracing_bridge(provider)
            .with_filter(filter_fn(|metadata| !metadata.target().starts_with("opentelemetry")))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(output_layer(config)?)
        .with(bridge)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}

/// Build the formatting layer for `config` without installing it.
pub fn output_layer<S>(config: &LogConfig) -> Result<Box<dyn Layer<S> + Send + Sync>, LogError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let writer = match &config.output_path {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| LogError::FileOpen(e.to_string()))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let base = fmt::layer().with_writer(writer);
    let layer: Box<dyn Layer<S> + Send + Sync> = match config.format {
        LogFormat::Json => Box::new(base.json()),
        LogFormat::Pretty => Box::new(base.pretty()),
        LogFormat::Plain => Box::new(base.event_format(MessageOnly)),
        LogFormat::NestedJson => Box::new(base.event_format(NestedJson)),
    };
    Ok(layer)
}
