// Copyright 2025-2026 owasp-logger Contributors
// SPDX-License-Identifier: Apache-2.0

//! Config CLI subcommands: show, defaults, validate.
//!
//! These commands read configuration directly from environment variables.

use tracing_subscriber::EnvFilter;

use crate::config::{self, EffectiveConfig, DEFAULT_APPID};
use crate::export::ExportTarget;
use crate::telemetry::LogFormat;

/// Print effective config as key-value pairs to stdout.
pub fn run_show() {
    let cfg = config::load().effective_config();
    print_config(&cfg);
}

/// Print default config values (no env overrides) to stdout.
pub fn run_defaults() {
    println!("OWASP_LOG_APPID={}", DEFAULT_APPID);
    println!("OWASP_LOG_NAME=owasp");
    println!("OWASP_LOG_LEVEL=info");
    println!("OWASP_LOG_FORMAT=plain");
    println!("OWASP_LOG_FILE=");
    println!("OWASP_LOG_EXPORT=off");
}

/// Validate configuration for obvious misconfigurations.
///
/// Returns 0 if valid, 1 if any warnings are found.
pub fn run_validate() -> i32 {
    let warnings = validation_warnings();
    for warning in &warnings {
        eprintln!("WARNING: {}", warning);
    }

    if warnings.is_empty() {
        println!("Configuration is valid.");
        0
    } else {
        1
    }
}

fn validation_warnings() -> Vec<String> {
    let cfg = config::load();
    let mut warnings = Vec::new();

    if let Err(e) = EnvFilter::try_new(&cfg.log.level) {
        warnings.push(format!(
            "OWASP_LOG_LEVEL ({}) is not a valid filter: {}",
            cfg.log.level, e
        ));
    }

    if let Ok(raw) = std::env::var("OWASP_LOG_FORMAT") {
        if LogFormat::parse(&raw).is_none() {
            warnings.push(format!(
                "OWASP_LOG_FORMAT ({}) is not recognized; using {}",
                raw,
                cfg.log.format.as_str()
            ));
        }
    }

    if let Ok(raw) = std::env::var("OWASP_LOG_EXPORT") {
        if ExportTarget::parse(&raw).is_none() {
            warnings.push(format!(
                "OWASP_LOG_EXPORT ({}) is not recognized; using {}",
                raw,
                cfg.export.as_str()
            ));
        }
    }

    if let Some(parent) = cfg
        .log
        .output_path
        .as_ref()
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
    {
        if !parent.is_dir() {
            warnings.push(format!(
                "OWASP_LOG_FILE directory {} does not exist",
                parent.display()
            ));
        }
    }

    warnings
}

fn print_config(cfg: &EffectiveConfig) {
    println!("OWASP_LOG_APPID={}", cfg.appid);
    println!("OWASP_LOG_NAME={}", cfg.logger_name);
    println!("OWASP_LOG_LEVEL={}", cfg.level);
    println!("OWASP_LOG_FORMAT={}", cfg.format);
    println!(
        "OWASP_LOG_FILE={}",
        cfg.output_path.as_deref().unwrap_or_default()
    );
    println!("OWASP_LOG_EXPORT={}", cfg.export);
}
