//! Field extraction from `tracing` events.

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};

use crate::event::NESTED_JSON_KEY;

/// Collects the message and the remaining fields of an event.
///
/// The `owasp_event` field is parsed back into a JSON object; if it does not
/// parse it is kept as a plain string.
#[derive(Debug, Default)]
pub(crate) struct FieldVisitor {
    pub message: Option<String>,
    pub fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert_text(&mut self, field: &Field, text: String) {
        if field.name() == "message" {
            self.message = Some(text);
            return;
        }

        let value = if field.name() == NESTED_JSON_KEY {
            match serde_json::from_str::<Value>(&text) {
                Ok(parsed @ Value::Object(_)) => parsed,
                _ => Value::String(text),
            }
        } else {
            Value::String(text)
        };
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert_text(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert_text(field, format!("{:?}", value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), Value::Number(value.into()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), Value::Number(value.into()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), Value::Bool(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(number) = serde_json::Number::from_f64(value) {
            self.fields
                .insert(field.name().to_string(), Value::Number(number));
        }
    }
}
