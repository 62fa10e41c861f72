//! Telemetry: subscriber setup and output formats for OWASP events.

mod fields;
mod format;
mod logging;

pub(crate) use fields::FieldVisitor;
pub use format::{MessageOnly, NestedJson};
pub use logging::{init_logging, output_layer, LogConfig, LogError, LogFormat};
