//! The OWASP event record and its serialized forms.

use chrono::{DateTime, FixedOffset, Local, SubsecRound};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Severity;

/// Key under which the structured event travels as side-channel data and
/// inside nested JSON payloads.
pub const NESTED_JSON_KEY: &str = "owasp_event";

/// A single security event in the OWASP logging format.
///
/// Field order here is the wire order: `datetime, appid, event, level,
/// description`. Empty string fields are left out of the serialized forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwaspEvent {
    #[serde(with = "iso8601")]
    datetime: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    appid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    event: String,
    level: Severity,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
}

impl OwaspEvent {
    /// Create an event stamped with the current local time.
    pub fn new(
        appid: impl Into<String>,
        event_id: impl Into<String>,
        level: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(Local::now().fixed_offset(), appid, event_id, level, description)
    }

    /// Create an event with an explicit timestamp.
    ///
    /// The timestamp is truncated to microseconds, the resolution of the
    /// serialized form.
    pub fn with_timestamp(
        datetime: DateTime<FixedOffset>,
        appid: impl Into<String>,
        event_id: impl Into<String>,
        level: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            datetime: datetime.trunc_subsecs(6),
            appid: appid.into(),
            event: event_id.into(),
            level,
            description: description.into(),
        }
    }

    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    pub fn appid(&self) -> &str {
        &self.appid
    }

    pub fn event_id(&self) -> &str {
        &self.event
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a JSON mapping, used as side-channel metadata.
    pub fn to_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "event serialized to a non-object value: {}",
                other
            ))),
        }
    }

    /// Parse an event from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

mod iso8601 {
    use chrono::{DateTime, FixedOffset, SecondsFormat, SubsecRound};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(datetime: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&datetime.to_rfc3339_opts(SecondsFormat::Micros, false))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|datetime| datetime.trunc_subsecs(6))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
            .unwrap()
    }

    #[test]
    fn test_json_field_order() {
        let event = OwaspEvent::with_timestamp(
            fixed_time(),
            "example.appid",
            "authn_login_fail:ananas-alex",
            Severity::Warning,
            "User ananas-alex login failed",
        );
        assert_eq!(
            event.to_json().unwrap(),
            "{\"datetime\":\"2025-03-14T09:26:53.000000+02:00\",\
             \"appid\":\"example.appid\",\
             \"event\":\"authn_login_fail:ananas-alex\",\
             \"level\":\"WARNING\",\
             \"description\":\"User ananas-alex login failed\"}"
        );
    }

    #[test]
    fn test_empty_fields_omitted() {
        let event =
            OwaspEvent::with_timestamp(fixed_time(), "app", "sys_crash:oom", Severity::Warning, "");
        let json = event.to_json().unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("null"));

        let map = event.to_map().unwrap();
        assert!(!map.contains_key("description"));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_map_matches_json() {
        let event = OwaspEvent::new("app", "authz_fail:bob,resource", Severity::Critical, "denied");
        let map = event.to_map().unwrap();
        let reparsed: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
        assert_eq!(Value::Object(map), reparsed);
    }

    #[test]
    fn test_timestamp_truncated_to_micros() {
        let precise = fixed_time() + chrono::Duration::nanoseconds(123_456_789);
        let event = OwaspEvent::with_timestamp(precise, "app", "e", Severity::Info, "d");
        assert_eq!(event.datetime().timestamp_subsec_nanos(), 123_456_000);
    }

    #[test]
    fn test_escaping_free_text() {
        let event =
            OwaspEvent::new("app", "sys_crash:\"quoted\"", Severity::Warning, "line\nbreak");
        let json = event.to_json().unwrap();
        let back = OwaspEvent::from_json(&json).unwrap();
        assert_eq!(back.event_id(), "sys_crash:\"quoted\"");
        assert_eq!(back.description(), "line\nbreak");
    }

    #[test]
    fn test_invalid_datetime_rejected() {
        let json = r#"{"datetime":"yesterday","appid":"a","event":"e","level":"INFO"}"#;
        assert!(OwaspEvent::from_json(json).is_err());
    }
}
