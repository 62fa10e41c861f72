//! Dispatcher tests: one backend call per event, fixed severity policy,
//! pass-through of plain messages.

use std::sync::Arc;

use owasp_logger::{OwaspEvent, OwaspLogger, RecordingBackend, SecurityEvent, Severity};

fn logger() -> (Arc<RecordingBackend>, OwaspLogger) {
    let backend = Arc::new(RecordingBackend::new());
    let logger = OwaspLogger::new("example.appid", backend.clone());
    (backend, logger)
}

/// Emit one event and return its level and parsed record.
fn emit_one(call: impl FnOnce(&OwaspLogger)) -> (Severity, OwaspEvent) {
    let (backend, logger) = logger();
    call(&logger);

    let calls = backend.calls();
    assert_eq!(calls.len(), 1, "exactly one backend call per event");
    let event = OwaspEvent::from_json(&calls[0].message).unwrap();
    assert_eq!(calls[0].level, event.level());
    (calls[0].level, event)
}

// =============================================================================
// Severity table
// =============================================================================

type Case = (Box<dyn Fn(&OwaspLogger)>, Severity);

fn case(call: impl Fn(&OwaspLogger) + 'static, severity: Severity) -> Case {
    (Box::new(call), severity)
}

#[test]
fn severity_table_is_fixed() {
    let cases = vec![
        case(|l| l.authn_login_successafterfail("alex", 2).unwrap(), Severity::Info),
        case(|l| l.authn_login_fail("alex").unwrap(), Severity::Warning),
        case(|l| l.authn_login_fail_max("alex", 3).unwrap(), Severity::Warning),
        case(|l| l.authn_login_lock("alex").unwrap(), Severity::Warning),
        case(|l| l.authn_password_change("alex").unwrap(), Severity::Info),
        case(|l| l.authn_password_change_fail("alex").unwrap(), Severity::Critical),
        case(|l| l.authn_token_created("alex", &["read"]).unwrap(), Severity::Info),
        case(|l| l.authn_token_revoked("alex", "t-1").unwrap(), Severity::Info),
        case(|l| l.authn_token_delete("alex").unwrap(), Severity::Warning),
        case(|l| l.authz_fail("alex").unwrap(), Severity::Critical),
        case(|l| l.authz_admin("bob", "alex").unwrap(), Severity::Warning),
        case(|l| l.sys_startup("ops").unwrap(), Severity::Warning),
        case(|l| l.sys_shutdown("ops").unwrap(), Severity::Warning),
        case(|l| l.sys_restart("ops").unwrap(), Severity::Warning),
        case(|l| l.sys_crash("oom").unwrap(), Severity::Warning),
        case(|l| l.sys_monitor_disabled("ops", "auditd").unwrap(), Severity::Warning),
        case(|l| l.user_created("root", "alex", &["admin"]).unwrap(), Severity::Warning),
        case(|l| l.user_updated("root", "alex", &["admin"]).unwrap(), Severity::Warning),
    ];

    assert_eq!(cases.len(), SecurityEvent::CATEGORIES.len());
    for (call, expected) in cases {
        let (level, event) = emit_one(call);
        assert_eq!(level, expected, "severity for {}", event.event_id());
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn authz_admin_scenario() {
    let (level, event) = emit_one(|l| l.authz_admin("banana-bob", "coconut-charlie").unwrap());
    assert_eq!(level, Severity::Warning);
    assert_eq!(event.appid(), "example.appid");
    assert_eq!(
        event.event_id(),
        "authz_admin:coconut-charlie,user_privilege_change"
    );
    assert_eq!(
        event.description(),
        "Administrator banana-bob has updated privileges of user coconut-charlie from user to admin"
    );
}

#[test]
fn authn_login_fail_max_scenario() {
    let (level, event) = emit_one(|l| l.authn_login_fail_max("ananas-alex", 3).unwrap());
    assert_eq!(level, Severity::Warning);
    assert_eq!(event.event_id(), "authn_login_fail_max:ananas-alex,3");
    assert_eq!(
        event.description(),
        "User ananas-alex reached the login fail limit of 3"
    );
}

#[test]
fn system_descriptions() {
    let (_, startup) = emit_one(|l| l.sys_startup("ops").unwrap());
    assert_eq!(startup.description(), "User ops spawned a new instance");
    let (_, shutdown) = emit_one(|l| l.sys_shutdown("ops").unwrap());
    assert_eq!(shutdown.description(), "User ops stopped this instance");
    let (_, restart) = emit_one(|l| l.sys_restart("ops").unwrap());
    assert_eq!(restart.description(), "User ops initiated a restart");
    let (_, crash) = emit_one(|l| l.sys_crash("disk full").unwrap());
    assert_eq!(crash.description(), "The system crashed due to disk full error");
}

#[test]
fn token_revoked_argument_order() {
    let (_, event) = emit_one(|l| l.authn_token_revoked("bob", "tok-9").unwrap());
    assert_eq!(event.event_id(), "authn_token_revoked:bob,tok-9");
    assert_eq!(event.description(), "Token ID: tok-9 was revoked for user bob");
}

// =============================================================================
// Determinism and distinctness
// =============================================================================

#[test]
fn identical_arguments_give_identical_strings() {
    let (_, a) = emit_one(|l| l.authn_login_successafterfail("alex", 4).unwrap());
    let (_, b) = emit_one(|l| l.authn_login_successafterfail("alex", 4).unwrap());
    assert_eq!(a.event_id(), b.event_id());
    assert_eq!(a.description(), b.description());
}

#[test]
fn different_arguments_are_not_conflated() {
    let (_, a) = emit_one(|l| l.sys_monitor_disabled("ops", "auditd").unwrap());
    let (_, b) = emit_one(|l| l.sys_monitor_disabled("ops", "falco").unwrap());
    assert_ne!(a.event_id(), b.event_id());
    assert_ne!(a.description(), b.description());

    let (_, created) = emit_one(|l| l.user_created("root", "alex", &["admin"]).unwrap());
    let (_, updated) = emit_one(|l| l.user_updated("root", "alex", &["admin"]).unwrap());
    assert_ne!(created.event_id(), updated.event_id());
}

// =============================================================================
// Side channel and pass-through
// =============================================================================

#[test]
fn side_channel_matches_message() {
    let (backend, logger) = logger();
    logger.authz_fail("mallory").unwrap();

    let call = &backend.calls()[0];
    let extra = call.extra.clone().expect("side-channel data");
    let message: serde_json::Value = serde_json::from_str(&call.message).unwrap();
    assert_eq!(serde_json::Value::Object(extra), message);
}

#[test]
fn plain_messages_are_delegated_unchanged() {
    let (backend, logger) = logger();
    logger.debug("d");
    logger.info("i");
    logger.warning("w");
    logger.error("e");
    logger.critical("c");
    logger.log(Severity::Info, "explicit");

    let calls = backend.calls();
    let seen: Vec<(Severity, &str)> = calls
        .iter()
        .map(|c| (c.level, c.message.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Severity::Debug, "d"),
            (Severity::Info, "i"),
            (Severity::Warning, "w"),
            (Severity::Error, "e"),
            (Severity::Critical, "c"),
            (Severity::Info, "explicit"),
        ]
    );
    assert!(calls.iter().all(|c| c.extra.is_none()));
}

#[test]
fn emit_accepts_prebuilt_events() {
    let (backend, logger) = logger();
    let event = SecurityEvent::AuthnLoginLock {
        user: "alex".into(),
    };
    logger.emit(&event).unwrap();
    logger.emit(&event).unwrap();
    assert_eq!(backend.len(), 2);
}

#[test]
fn dispatcher_is_shareable_across_threads() {
    let (backend, logger) = logger();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let logger = logger.clone();
            std::thread::spawn(move || logger.authn_login_fail(&format!("user-{}", i)).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(backend.len(), 4);
}
