//! Configuration loading from environment variables.
//!
//! All configuration values are loaded from `OWASP_LOG_*` environment
//! variables with sensible defaults. Invalid values fall back to defaults
//! without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `OWASP_LOG_APPID` | crate name | Application identifier on every event |
//! | `OWASP_LOG_NAME` | `owasp` | Logger name recorded on every event |
//! | `OWASP_LOG_LEVEL` | `info` | Log filter directive |
//! | `OWASP_LOG_FORMAT` | `plain` | `json`, `pretty`, `plain` or `nested_json` |
//! | `OWASP_LOG_FILE` | unset | Write logs to this file instead of stderr |
//! | `OWASP_LOG_EXPORT` | `off` | OpenTelemetry log export: `off` or `console` |

use std::path::PathBuf;

use crate::backend::DEFAULT_LOGGER_NAME;
use crate::export::ExportTarget;
use crate::telemetry::{LogConfig, LogFormat};

/// Application identifier used when `OWASP_LOG_APPID` is not set.
pub const DEFAULT_APPID: &str = env!("CARGO_PKG_NAME");

/// Effective configuration summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub appid: String,
    pub logger_name: String,
    pub level: String,
    pub format: &'static str,
    pub output_path: Option<String>,
    pub export: &'static str,
}

/// All configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub appid: String,
    pub logger_name: String,
    pub log: LogConfig,
    pub export: ExportTarget,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            appid: DEFAULT_APPID.to_string(),
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
            log: LogConfig::default(),
            export: ExportTarget::default(),
        }
    }
}

/// Read a non-empty string env var, returning `default` on missing or blank.
fn parse_string(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
        _ => default.to_string(),
    }
}

/// Load logging configuration from environment.
fn load_log_config() -> LogConfig {
    let defaults = LogConfig::default();
    let level = parse_string("OWASP_LOG_LEVEL", &defaults.level);
    let format = std::env::var("OWASP_LOG_FORMAT")
        .ok()
        .and_then(|raw| LogFormat::parse(&raw))
        .unwrap_or(defaults.format);
    let output_path = std::env::var("OWASP_LOG_FILE")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    LogConfig {
        format,
        level,
        output_path,
    }
}

/// Load all configuration from environment variables.
///
/// Missing or invalid values fall back to safe defaults without panicking.
pub fn load() -> EnvConfig {
    EnvConfig {
        appid: parse_string("OWASP_LOG_APPID", DEFAULT_APPID),
        logger_name: parse_string("OWASP_LOG_NAME", DEFAULT_LOGGER_NAME),
        log: load_log_config(),
        export: std::env::var("OWASP_LOG_EXPORT")
            .ok()
            .and_then(|raw| ExportTarget::parse(&raw))
            .unwrap_or_default(),
    }
}

impl EnvConfig {
    /// Return a summary of all effective values.
    pub fn effective_config(&self) -> EffectiveConfig {
        EffectiveConfig {
            appid: self.appid.clone(),
            logger_name: self.logger_name.clone(),
            level: self.log.level.clone(),
            format: self.log.format.as_str(),
            output_path: self
                .log
                .output_path
                .as_ref()
                .map(|p| p.display().to_string()),
            export: self.export.as_str(),
        }
    }
}
