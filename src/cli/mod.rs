// Copyright 2025-2026 owasp-logger Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI module for the owasp-logger command-line tool.
//!
//! ## Usage
//!
//! ```bash
//! owasp-logger-cli emit authz_admin admin=banana-bob user=coconut-charlie
//! owasp-logger-cli categories
//! owasp-logger-cli demo
//! owasp-logger-cli config show
//! ```

pub mod config_cmd;
pub mod emit_cmd;

pub use emit_cmd::{build_event, parse_pairs, run_categories, run_demo, run_emit, CliError};
