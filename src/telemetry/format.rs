//! Event formatters for the OWASP-specific output formats.

use std::fmt;

use serde_json::{Map, Value};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::fields::FieldVisitor;
use crate::event::NESTED_JSON_KEY;

/// Writes only the event message, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageOnly;

impl<S, N> FormatEvent<S, N> for MessageOnly
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        writeln!(writer, "{}", visitor.message.unwrap_or_default())
    }
}

/// Writes one JSON object per event with the OWASP record nested inside:
///
/// ```json
/// {"logger":"owasp","level":"WARNING","message":"User bob login failed","owasp_event":{...}}
/// ```
///
/// For OWASP events `message` is the event description and `level` the OWASP
/// severity name; other events use their own message and level.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedJson;

impl<S, N> FormatEvent<S, N> for NestedJson
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let payload = nested_payload(
            event.metadata().target(),
            event.metadata().level(),
            visitor,
        );
        let line = serde_json::to_string(&Value::Object(payload)).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

fn nested_payload(target: &str, level: &Level, mut visitor: FieldVisitor) -> Map<String, Value> {
    let owasp_event = match visitor.fields.remove(NESTED_JSON_KEY) {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    };

    let logger = visitor
        .fields
        .get("logger")
        .and_then(Value::as_str)
        .unwrap_or(target)
        .to_string();

    let level = owasp_event
        .as_ref()
        .and_then(|e| e.get("level"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| level_name(level).to_string());

    let message = owasp_event
        .as_ref()
        .and_then(|e| e.get("description"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or(visitor.message)
        .unwrap_or_default();

    let mut payload = Map::new();
    payload.insert("logger".into(), Value::String(logger));
    payload.insert("level".into(), Value::String(level));
    payload.insert("message".into(), Value::String(message));
    if let Some(event) = owasp_event {
        payload.insert(NESTED_JSON_KEY.into(), Value::Object(event));
    }
    payload
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}
