//! owasp-logger command-line entry point.
//!
//! ## CLI Subcommands
//!
//! - `owasp-logger-cli emit <category> key=value...` - Emit one OWASP event
//! - `owasp-logger-cli categories` - List recognized event categories
//! - `owasp-logger-cli demo` - Emit a plain message and sample events
//! - `owasp-logger-cli config show|defaults|validate` - Inspect configuration

use std::process::ExitCode;

use opentelemetry_sdk::logs::SdkLoggerProvider;
use owasp_logger::cli::{config_cmd, run_categories, run_demo, run_emit};
use owasp_logger::config as owasp_config;
use owasp_logger::export::provider_for;
use owasp_logger::telemetry::init_logging;
use owasp_logger::OwaspLogger;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "emit" => {
            let Some(category) = args.get(2) else {
                eprintln!("Missing event category");
                print_command_help("emit");
                return ExitCode::from(2u8);
            };
            let (logger, provider) = match init_logger() {
                Ok(session) => session,
                Err(code) => return code,
            };
            let code = run_emit(&logger, category, &args[3..]);
            shutdown_export(provider);
            ExitCode::from(code as u8)
        }
        "categories" => {
            run_categories();
            ExitCode::SUCCESS
        }
        "demo" => {
            let (logger, provider) = match init_logger() {
                Ok(session) => session,
                Err(code) => return code,
            };
            let code = run_demo(&logger);
            shutdown_export(provider);
            ExitCode::from(code as u8)
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    config_cmd::run_show();
                    ExitCode::SUCCESS
                }
                "defaults" => {
                    config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                "validate" => {
                    let code = config_cmd::run_validate();
                    ExitCode::from(code as u8)
                }
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_command_help("config");
                    ExitCode::FAILURE
                }
            }
        }
        "help" | "--help" | "-h" => {
            if let Some(subcommand) = args.get(2) {
                print_command_help(subcommand);
            } else {
                print_usage();
            }
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("owasp-logger {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

/// Install the global subscriber from the environment and build a logger
/// writing through it. The provider is returned when OpenTelemetry export is
/// enabled so it can be shut down before exit.
fn init_logger() -> Result<(OwaspLogger, Option<SdkLoggerProvider>), ExitCode> {
    let config = owasp_config::load();
    let provider = provider_for(config.export);
    if let Err(e) = init_logging(&config.log, provider.as_ref()) {
        eprintln!("Logging setup failed: {}", e);
        return Err(ExitCode::from(2u8));
    }
    Ok((OwaspLogger::from_config(&config), provider))
}

fn shutdown_export(provider: Option<SdkLoggerProvider>) {
    if let Some(provider) = provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "OpenTelemetry log export shutdown failed");
        }
    }
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "owasp-logger - OWASP security event logging v{}

USAGE:
    owasp-logger-cli [COMMAND] [ARGS]

COMMANDS:
    emit         Emit one security event
    categories   List recognized event categories
    demo         Emit a plain message and a few sample events
    config       Inspect configuration (show, defaults, validate)
    version      Show version information
    help         Show this help message

EXAMPLES:
    owasp-logger-cli emit authn_login_fail user=ananas-alex
    owasp-logger-cli emit authz_admin admin=banana-bob user=coconut-charlie
    owasp-logger-cli emit user_created admin=root user=bob permissions=read,write
    OWASP_LOG_FORMAT=nested_json owasp-logger-cli demo
    OWASP_LOG_EXPORT=console owasp-logger-cli demo

ENVIRONMENT:
    OWASP_LOG_APPID   Application identifier (default: owasp-logger)
    OWASP_LOG_NAME    Logger name recorded on events (default: owasp)
    OWASP_LOG_LEVEL   Log filter directive (default: info)
    OWASP_LOG_FORMAT  json, pretty, plain or nested_json (default: plain)
    OWASP_LOG_FILE    Write logs to this file instead of stderr
    OWASP_LOG_EXPORT  OpenTelemetry log export: off or console (default: off)

EXIT CODES:
    0  Success
    1  Failure
    2  Usage or configuration error
",
        version
    );
}

/// Print detailed help for a specific command.
fn print_command_help(command: &str) {
    match command {
        "emit" => {
            eprintln!(
                "owasp-logger-cli emit - Emit one security event

USAGE:
    owasp-logger-cli emit <CATEGORY> [KEY=VALUE]...

DESCRIPTION:
    Builds the named OWASP event from KEY=VALUE arguments and logs it
    through the configured subscriber. `permissions` takes a comma
    separated list; `failures` and `fail_limit` take integers.
    Run `owasp-logger-cli categories` for the list of categories.

EXIT CODES:
    0  Event emitted
    1  Event could not be serialized
    2  Unknown category or missing/invalid argument
"
            );
        }
        "config" => {
            eprintln!(
                "owasp-logger-cli config - Inspect configuration

USAGE:
    owasp-logger-cli config [show|defaults|validate]

DESCRIPTION:
    show      Print the effective configuration from the environment
    defaults  Print the default values
    validate  Check the environment for invalid values (exit 1 on warnings)
"
            );
        }
        _ => print_usage(),
    }
}
