//! Log record processor promoting the OWASP description into the body.

use opentelemetry::logs::{AnyValue, LogRecord as _};
use opentelemetry::{InstrumentationScope, Key};
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::logs::{LogProcessor, SdkLogRecord};
use serde_json::Value;

use crate::event::NESTED_JSON_KEY;

/// Promotes the OWASP event description into the record body.
///
/// The `owasp_event` attribute is read either as a map or as the JSON string
/// the `tracing` bridge records it as. Records without it, or whose event has
/// no string `description`, pass through untouched. Running it twice on the
/// same record changes nothing the second time.
///
/// Register it before the exporting processor:
///
/// ```
/// use opentelemetry_sdk::logs::SdkLoggerProvider;
/// use owasp_logger::OwaspBodyProcessor;
///
/// let provider = SdkLoggerProvider::builder()
///     .with_log_processor(OwaspBodyProcessor)
///     .with_simple_exporter(opentelemetry_stdout::LogExporter::default())
///     .build();
/// # let _ = provider.shutdown();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OwaspBodyProcessor;

impl LogProcessor for OwaspBodyProcessor {
    fn emit(&self, record: &mut SdkLogRecord, _scope: &InstrumentationScope) {
        let description = record
            .attributes_iter()
            .find(|(key, _)| key.as_str() == NESTED_JSON_KEY)
            .and_then(|(_, value)| description_of(value));

        if let Some(description) = description {
            record.set_body(AnyValue::from(description));
        }
    }

    fn force_flush(&self) -> OTelSdkResult {
        Ok(())
    }

    fn shutdown(&self) -> OTelSdkResult {
        Ok(())
    }
}

fn description_of(event: &AnyValue) -> Option<String> {
    match event {
        AnyValue::Map(map) => match map.get(&Key::from_static_str("description")) {
            Some(AnyValue::String(description)) => Some(description.as_str().to_string()),
            _ => None,
        },
        AnyValue::String(raw) => serde_json::from_str::<Value>(raw.as_str())
            .ok()?
            .get("description")?
            .as_str()
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::logs::{LogRecord as _, Logger, LoggerProvider};
    use opentelemetry_sdk::logs::SdkLoggerProvider;
    use std::collections::HashMap;

    fn fresh_record() -> SdkLogRecord {
        let provider = SdkLoggerProvider::builder().build();
        provider.logger("owasp-test").create_log_record()
    }

    fn process(record: &mut SdkLogRecord) {
        let scope = InstrumentationScope::builder("owasp-test").build();
        OwaspBodyProcessor.emit(record, &scope);
    }

    #[test]
    fn test_promotes_description_from_json_string() {
        let mut record = fresh_record();
        record.set_body(AnyValue::from("{\"event\":\"authn_login_fail:bob\"}"));
        record.add_attribute(
            NESTED_JSON_KEY,
            AnyValue::from(r#"{"event":"authn_login_fail:bob","description":"X"}"#),
        );
        process(&mut record);
        assert_eq!(record.body(), Some(&AnyValue::from("X")));
    }

    #[test]
    fn test_promotes_description_from_map() {
        let mut event = HashMap::new();
        event.insert(Key::from_static_str("description"), AnyValue::from("X"));
        let mut record = fresh_record();
        record.set_body(AnyValue::from("raw"));
        record.add_attribute(NESTED_JSON_KEY, AnyValue::Map(Box::new(event)));
        process(&mut record);
        assert_eq!(record.body(), Some(&AnyValue::from("X")));
    }

    #[test]
    fn test_leaves_plain_record_alone() {
        let mut record = fresh_record();
        record.set_body(AnyValue::from("hello"));
        record.add_attribute("logger", AnyValue::from("app"));
        process(&mut record);
        assert_eq!(record.body(), Some(&AnyValue::from("hello")));
    }

    #[test]
    fn test_ignores_unparsable_side_channel() {
        let mut record = fresh_record();
        record.set_body(AnyValue::from("hello"));
        record.add_attribute(NESTED_JSON_KEY, AnyValue::from("not json"));
        process(&mut record);
        assert_eq!(record.body(), Some(&AnyValue::from("hello")));
    }

    #[test]
    fn test_missing_description_keeps_body() {
        let mut record = fresh_record();
        record.set_body(AnyValue::from("hello"));
        record.add_attribute(NESTED_JSON_KEY, AnyValue::from(r#"{"event":"sys_crash:oom"}"#));
        process(&mut record);
        assert_eq!(record.body(), Some(&AnyValue::from("hello")));
    }

    #[test]
    fn test_idempotent() {
        let mut record = fresh_record();
        record.add_attribute(NESTED_JSON_KEY, AnyValue::from(r#"{"description":"X"}"#));
        process(&mut record);
        let once = record.body().cloned();
        process(&mut record);
        assert_eq!(record.body().cloned(), once);
        assert_eq!(once, Some(AnyValue::from("X")));
    }

    #[test]
    fn test_lifecycle_hooks_succeed() {
        assert!(OwaspBodyProcessor.force_flush().is_ok());
        assert!(OwaspBodyProcessor.shutdown().is_ok());
    }
}
