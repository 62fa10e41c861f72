//! Logging backends the OWASP dispatcher writes into.
//!
//! The dispatcher only needs a generic "log at level" entry point plus the
//! conventional severity-named methods; [`LogBackend`] is that capability
//! set. [`TracingBackend`] is the production implementation and
//! [`RecordingBackend`] keeps calls in memory.

use std::fmt;

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

use crate::event::Severity;
use crate::telemetry::MessageOnly;

/// `tracing` target used for every event written by [`TracingBackend`].
pub const OWASP_TARGET: &str = "owasp";

/// Logger name recorded when none is configured.
pub const DEFAULT_LOGGER_NAME: &str = "owasp";

/// Minimal logging capability set wrapped by the dispatcher.
pub trait LogBackend: Send + Sync {
    /// Log `message` at `level`, with optional structured side-channel data.
    fn log(&self, level: Severity, message: &str, extra: Option<&Map<String, Value>>);

    fn debug(&self, message: &str) {
        self.log(Severity::Debug, message, None);
    }

    fn info(&self, message: &str) {
        self.log(Severity::Info, message, None);
    }

    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message, None);
    }

    fn error(&self, message: &str) {
        self.log(Severity::Error, message, None);
    }

    fn critical(&self, message: &str) {
        self.log(Severity::Critical, message, None);
    }
}

/// Backend that emits `tracing` events.
///
/// Each event carries the message, a `logger` field with the configured name
/// and, when side-channel data is present, an `owasp_event` field holding it
/// as a JSON object string.
#[derive(Clone)]
pub struct TracingBackend {
    name: String,
    dispatch: Option<Dispatch>,
}

impl TracingBackend {
    /// Write through whatever subscriber is current at the call site.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dispatch: None,
        }
    }

    /// Write through a private dispatcher instead of the ambient one.
    pub fn with_dispatch(name: impl Into<String>, dispatch: Dispatch) -> Self {
        Self {
            name: name.into(),
            dispatch: Some(dispatch),
        }
    }

    /// Console backend: message-only lines on stderr, filtered at `level`.
    pub fn console(level: tracing::Level) -> Self {
        Self::console_with_writer(level, std::io::stderr)
    }

    /// Message-only lines written to `writer`, filtered at `level`.
    pub fn console_with_writer<W>(level: tracing::Level, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(writer)
            .event_format(MessageOnly)
            .finish();
        Self::with_dispatch(DEFAULT_LOGGER_NAME, Dispatch::new(subscriber))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, level: Severity, message: &str, extra: Option<&Map<String, Value>>) {
        let extra = extra.map(|map| tracing::field::display(JsonField(map)));

        macro_rules! owasp_event {
            ($level:expr) => {
                tracing::event!(
                    target: OWASP_TARGET,
                    $level,
                    logger = %self.name,
                    owasp_event = extra,
                    "{}",
                    message
                )
            };
        }

        match level {
            Severity::Debug => owasp_event!(tracing::Level::DEBUG),
            Severity::Info => owasp_event!(tracing::Level::INFO),
            Severity::Warning => owasp_event!(tracing::Level::WARN),
            Severity::Error | Severity::Critical => owasp_event!(tracing::Level::ERROR),
        }
    }
}

impl fmt::Debug for TracingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingBackend")
            .field("name", &self.name)
            .field("private_dispatch", &self.dispatch.is_some())
            .finish()
    }
}

impl LogBackend for TracingBackend {
    fn log(&self, level: Severity, message: &str, extra: Option<&Map<String, Value>>) {
        match &self.dispatch {
            Some(dispatch) => {
                tracing::dispatcher::with_default(dispatch, || self.emit(level, message, extra))
            }
            None => self.emit(level, message, extra),
        }
    }
}

/// Renders a JSON object as a field value.
struct JsonField<'a>(&'a Map<String, Value>);

impl fmt::Display for JsonField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// A single call captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub level: Severity,
    pub message: String,
    pub extra: Option<Map<String, Value>>,
}

/// Backend that keeps every call in memory.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl LogBackend for RecordingBackend {
    fn log(&self, level: Severity, message: &str, extra: Option<&Map<String, Value>>) {
        self.calls.lock().push(RecordedCall {
            level,
            message: message.to_string(),
            extra: extra.cloned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend_captures_calls() {
        let backend = RecordingBackend::new();
        backend.info("hello");
        backend.critical("boom");

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].level, Severity::Info);
        assert_eq!(calls[0].message, "hello");
        assert!(calls[0].extra.is_none());
        assert_eq!(calls[1].level, Severity::Critical);
    }

    #[test]
    fn test_recording_backend_clear() {
        let backend = RecordingBackend::new();
        backend.warning("one");
        assert!(!backend.is_empty());
        backend.clear();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_json_field_renders_object() {
        let mut map = Map::new();
        map.insert("description".into(), Value::String("X".into()));
        assert_eq!(JsonField(&map).to_string(), r#"{"description":"X"}"#);
    }

    #[test]
    fn test_tracing_backend_without_subscriber() {
        // No subscriber installed: events are dropped without panicking.
        let backend = TracingBackend::new("test");
        backend.log(Severity::Critical, "nothing listens", None);
        assert_eq!(backend.name(), "test");
    }

    #[test]
    fn test_console_backend_name() {
        let backend = TracingBackend::console(tracing::Level::INFO);
        assert_eq!(backend.name(), DEFAULT_LOGGER_NAME);
    }

    #[test]
    fn test_console_writes_message_only_at_level() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let writer = std::sync::Mutex::new(file.reopen().unwrap());
        let backend = TracingBackend::console_with_writer(tracing::Level::INFO, writer);

        backend.debug("filtered out");
        backend.info("kept");
        let mut extra = Map::new();
        extra.insert("description".into(), Value::String("X".into()));
        backend.log(Severity::Critical, "{\"level\":\"CRITICAL\"}", Some(&extra));

        let output = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(output, "kept\n{\"level\":\"CRITICAL\"}\n");
    }
}
