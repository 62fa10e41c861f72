// Copyright 2025-2026 owasp-logger Contributors
// SPDX-License-Identifier: Apache-2.0

//! Event CLI subcommands: emit, categories, demo.

use std::collections::HashMap;

use thiserror::Error;

use crate::event::{EventError, SecurityEvent};
use crate::logger::OwaspLogger;

/// Errors from parsing event command arguments.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Expected key=value argument, got {0:?}")]
    InvalidPair(String),
    #[error(transparent)]
    Event(#[from] EventError),
}

/// Parse `key=value` arguments into a map. Later keys win.
pub fn parse_pairs(args: &[String]) -> Result<HashMap<String, String>, CliError> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(CliError::InvalidPair(arg.clone())),
        })
        .collect()
}

/// Build the event named by `category` from `key=value` arguments.
pub fn build_event(category: &str, args: &[String]) -> Result<SecurityEvent, CliError> {
    let pairs = parse_pairs(args)?;
    Ok(SecurityEvent::from_args(category, &pairs)?)
}

/// Emit one event. Returns 0 on success, 2 on bad arguments, 1 if the
/// event could not be serialized.
pub fn run_emit(logger: &OwaspLogger, category: &str, args: &[String]) -> i32 {
    let event = match build_event(category, args) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    match logger.emit(&event) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Print every recognized category, one per line.
pub fn run_categories() {
    for category in SecurityEvent::CATEGORIES {
        println!("{}", category);
    }
}

/// Emit a plain message followed by a few sample events.
pub fn run_demo(logger: &OwaspLogger) -> i32 {
    logger.info("Messages logged via info() keep their own format");

    let result = logger
        .authz_admin("banana-bob", "coconut-charlie")
        .and_then(|_| logger.authn_login_fail("ananas-alex"))
        .and_then(|_| logger.authn_login_fail_max("ananas-alex", 3));

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
