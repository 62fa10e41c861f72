//! Side-channel export through OpenTelemetry logs.
//!
//! `tracing` events reach an [`SdkLoggerProvider`] through the
//! `opentelemetry-appender-tracing` bridge. [`OwaspBodyProcessor`] sits in
//! front of the exporter and gives OWASP records a human-readable body taken
//! from their `owasp_event` attribute, so consumers that drop attributes
//! still see the description.

mod processor;

use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::{LogExporter, SdkLogger, SdkLoggerProvider};

pub use processor::OwaspBodyProcessor;

/// Where exported log records go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportTarget {
    /// No OpenTelemetry export.
    #[default]
    Off,
    /// OpenTelemetry log records printed to stdout.
    Console,
}

impl ExportTarget {
    /// Parse a target name as used in configuration.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Some(Self::Off),
            "console" | "stdout" => Some(Self::Console),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Console => "console",
        }
    }
}

/// Logger provider that runs [`OwaspBodyProcessor`] and then hands every
/// record to `exporter`.
pub fn provider_with_exporter<E>(exporter: E) -> SdkLoggerProvider
where
    E: LogExporter + 'static,
{
    SdkLoggerProvider::builder()
        .with_log_processor(OwaspBodyProcessor)
        .with_simple_exporter(exporter)
        .build()
}

/// Provider for `target`, or `None` when export is off.
pub fn provider_for(target: ExportTarget) -> Option<SdkLoggerProvider> {
    match target {
        ExportTarget::Off => None,
        ExportTarget::Console => Some(provider_with_exporter(
            opentelemetry_stdout::LogExporter::default(),
        )),
    }
}

/// `tracing` layer forwarding events into `provider`.
pub fn tracing_bridge(
    provider: &SdkLoggerProvider,
) -> OpenTelemetryTracingBridge<SdkLoggerProvider, SdkLogger> {
    OpenTelemetryTracingBridge::new(provider)
}
