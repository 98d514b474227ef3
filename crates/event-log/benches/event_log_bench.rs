use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use event_log::{EventLog, EventLogConfig, FileEventLog, InMemoryEventLog, TelemetryEvent};

fn make_event() -> TelemetryEvent {
    let mut payload = serde_json::Map::new();
    payload.insert("height".into(), serde_json::json!(2.3));
    payload.insert("location".into(), serde_json::json!({"x": 12, "y": 5}));
    TelemetryEvent::new("bench-session", "player_jump", Utc::now()).with_payload(payload)
}

fn bench_file_append_blocking(c: &mut Criterion) {
    let temp = tempfile::TempDir::new().unwrap();
    let log = FileEventLog::new(EventLogConfig::new(temp.path()));
    let event = make_event();

    c.bench_function("event_log/file_append_blocking", |b| {
        b.iter(|| log.append_blocking(&event).unwrap());
    });
}

fn bench_file_append_async(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let temp = tempfile::TempDir::new().unwrap();
    let log = FileEventLog::new(EventLogConfig::new(temp.path()));
    let event = make_event();

    c.bench_function("event_log/file_append_async", |b| {
        b.iter(|| rt.block_on(log.append(&event)).unwrap());
    });
}

fn bench_memory_append(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let log = InMemoryEventLog::new();
    let event = make_event();

    c.bench_function("event_log/memory_append", |b| {
        b.iter(|| rt.block_on(log.append(&event)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_file_append_blocking,
    bench_file_append_async,
    bench_memory_append
);
criterion_main!(benches);
