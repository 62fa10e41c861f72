//! OWASP security events: the record schema, its severity levels and the
//! recognized event categories.

mod category;
mod schema;
mod severity;

pub use category::SecurityEvent;
pub use schema::{OwaspEvent, NESTED_JSON_KEY};
pub use severity::Severity;

use thiserror::Error;

/// Errors raised while building or serializing an event.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Unknown event category: {0}")]
    UnknownCategory(String),
    #[error("Missing argument `{argument}` for {category}")]
    MissingArgument {
        category: String,
        argument: &'static str,
    },
    #[error("Invalid value {value:?} for argument `{argument}` of {category}")]
    InvalidArgument {
        category: String,
        argument: &'static str,
        value: String,
    },
    #[error("Event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
