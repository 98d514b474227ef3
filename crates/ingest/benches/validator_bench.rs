use chrono::Utc;
use criterion::{Criterion, criterion_group, criterion_main};
use ingest::{Submission, validate};

fn bench_validate_json(c: &mut Criterion) {
    let body = serde_json::json!({
        "session_id": "abc123",
        "timestamp": "2026-01-12T12:34:56Z",
        "event_type": "player_jump",
        "payload": {"height": 2.3, "location": {"x": 12, "y": 5}}
    });

    c.bench_function("validator/json", |b| {
        b.iter(|| validate(Submission::Json(body.clone()), Utc::now()).unwrap());
    });
}

fn bench_decode_and_validate_form(c: &mut Criterion) {
    let body = b"session_id=abc123&event_type=player_jump&payload=%7B%22height%22%3A2.3%7D";

    c.bench_function("validator/form_decode_and_validate", |b| {
        b.iter(|| {
            let submission =
                Submission::decode(Some("application/x-www-form-urlencoded"), body).unwrap();
            validate(submission, Utc::now()).unwrap()
        });
    });
}

fn bench_reject_invalid(c: &mut Criterion) {
    let body = serde_json::json!({"session_id": "", "event_type": 7, "payload": []});

    c.bench_function("validator/reject_invalid", |b| {
        b.iter(|| validate(Submission::Json(body.clone()), Utc::now()).unwrap_err());
    });
}

criterion_group!(
    benches,
    bench_validate_json,
    bench_decode_and_validate_form,
    bench_reject_invalid
);
criterion_main!(benches);
