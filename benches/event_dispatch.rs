//! Event dispatch and serialization benchmarks.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use owasp_logger::{OwaspEvent, OwaspLogger, RecordingBackend, SecurityEvent, Severity};

fn bench_to_json(c: &mut Criterion) {
    let event = OwaspEvent::new(
        "bench.appid",
        "authz_admin:coconut-charlie,user_privilege_change",
        Severity::Warning,
        "Administrator banana-bob has updated privileges of user coconut-charlie from user to admin",
    );

    c.bench_function("owasp_event_to_json", |b| {
        b.iter(|| black_box(&event).to_json())
    });
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    let permissions: Vec<String> = (0..16).map(|i| format!("perm-{}", i)).collect();
    let events = [
        (
            "authn_login_fail",
            SecurityEvent::AuthnLoginFail {
                user: "ananas-alex".into(),
            },
        ),
        (
            "user_created",
            SecurityEvent::UserCreated {
                admin: "root".into(),
                user: "ananas-alex".into(),
                permissions,
            },
        ),
    ];

    for (name, event) in &events {
        group.bench_with_input(BenchmarkId::new("category", name), event, |b, event| {
            let backend = Arc::new(RecordingBackend::new());
            let logger = OwaspLogger::new("bench.appid", backend.clone());
            b.iter(|| {
                logger.emit(black_box(event)).unwrap();
                // Keep the recorder from growing without bound.
                if backend.len() > 10_000 {
                    backend.clear();
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_to_json, bench_emit);
criterion_main!(benches);
