//! OWASP Logger
//!
//! Security event logging in the OWASP logging format on top of `tracing`.
//!
//! # Components
//!
//! - **Events**: the [`OwaspEvent`] record (`datetime, appid, event, level,
//!   description`) and the closed set of [`SecurityEvent`] categories
//! - **Dispatcher**: [`OwaspLogger`], one method per category, plus the plain
//!   severity-named methods of the wrapped backend
//! - **Backends**: [`LogBackend`] and its `tracing` implementation
//! - **Export**: an OpenTelemetry log processor that gives OWASP records a
//!   readable body before export
//!
//! # Example
//! ```no_run
//! use owasp_logger::telemetry::{init_logging, LogConfig, LogFormat};
//! use owasp_logger::{config, OwaspLogger};
//!
//! let config = config::load();
//! init_logging(
//!     &LogConfig { format: LogFormat::NestedJson, ..config.log.clone() },
//!     None,
//! )
//! .expect("logging");
//!
//! let logger = OwaspLogger::from_config(&config);
//! logger.info("This is what plain logs look like");
//! logger.authn_login_fail_max("ananas-alex", 3).expect("emit");
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod event;
pub mod export;
pub mod logger;
pub mod telemetry;

pub use backend::{LogBackend, RecordedCall, RecordingBackend, TracingBackend};
pub use event::{EventError, OwaspEvent, SecurityEvent, Severity, NESTED_JSON_KEY};
pub use export::{ExportTarget, OwaspBodyProcessor};
pub use logger::OwaspLogger;
